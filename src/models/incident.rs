//! Incident model.
//!
//! An incident is a reported emergency at one location: when it happened,
//! how urgent it is, how long the response is expected to take, and which
//! units it needs.
//!
//! # Lifecycle
//! `PENDING → ASSIGNED → IN_PROGRESS → COMPLETED`. Transitions are driven
//! by the caller; the engine only filters on status.

use std::fmt;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::ResponseWindow;
use crate::error::{DispatchError, Result};

/// Incident category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IncidentType {
    /// Structure or vehicle fire.
    Fire,
    /// Medical emergency.
    Medical,
    /// Traffic accident.
    Traffic,
    /// Criminal activity.
    Crime,
    /// Hazardous materials.
    Hazmat,
    /// Natural disaster.
    Natural,
}

impl IncidentType {
    /// Every category, in declaration order.
    pub const ALL: [IncidentType; 6] = [
        IncidentType::Fire,
        IncidentType::Medical,
        IncidentType::Traffic,
        IncidentType::Crime,
        IncidentType::Hazmat,
        IncidentType::Natural,
    ];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            IncidentType::Fire => "Fire",
            IncidentType::Medical => "Medical Emergency",
            IncidentType::Traffic => "Traffic Accident",
            IncidentType::Crime => "Criminal Activity",
            IncidentType::Hazmat => "Hazardous Materials",
            IncidentType::Natural => "Natural Disaster",
        }
    }
}

impl fmt::Display for IncidentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Urgency level. Ordered: `Info < Low < Medium < High < Critical`.
///
/// The numeric [`value`](Priority::value) (1..=5) doubles as the knapsack
/// value of an incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    /// Informational (1).
    Info,
    /// Low (2).
    Low,
    /// Medium (3).
    Medium,
    /// High (4).
    High,
    /// Critical (5).
    Critical,
}

impl Priority {
    /// Every level, most urgent first.
    pub const ALL: [Priority; 5] = [
        Priority::Critical,
        Priority::High,
        Priority::Medium,
        Priority::Low,
        Priority::Info,
    ];

    /// Numeric urgency, 1 (info) to 5 (critical).
    pub fn value(&self) -> u32 {
        match self {
            Priority::Info => 1,
            Priority::Low => 2,
            Priority::Medium => 3,
            Priority::High => 4,
            Priority::Critical => 5,
        }
    }

    /// Level for a numeric urgency.
    pub fn from_value(value: u32) -> Option<Self> {
        Priority::ALL.into_iter().find(|p| p.value() == value)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Priority::Info => "INFO",
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
            Priority::Critical => "CRITICAL",
        };
        f.write_str(name)
    }
}

/// Default response duration per priority level (minutes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityDurations {
    /// Critical incidents.
    pub critical: u32,
    /// High-priority incidents.
    pub high: u32,
    /// Medium-priority incidents.
    pub medium: u32,
    /// Low-priority incidents.
    pub low: u32,
    /// Informational incidents.
    pub info: u32,
}

impl PriorityDurations {
    /// Duration for a priority level (minutes).
    pub fn minutes(&self, priority: Priority) -> u32 {
        match priority {
            Priority::Critical => self.critical,
            Priority::High => self.high,
            Priority::Medium => self.medium,
            Priority::Low => self.low,
            Priority::Info => self.info,
        }
    }
}

impl Default for PriorityDurations {
    fn default() -> Self {
        Self {
            critical: 120,
            high: 90,
            medium: 60,
            low: 30,
            info: 15,
        }
    }
}

/// Incident lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IncidentStatus {
    /// Reported, not yet served.
    #[default]
    Pending,
    /// Units committed.
    Assigned,
    /// Units on scene.
    InProgress,
    /// Closed.
    Completed,
}

impl fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IncidentStatus::Pending => "PENDING",
            IncidentStatus::Assigned => "ASSIGNED",
            IncidentStatus::InProgress => "IN_PROGRESS",
            IncidentStatus::Completed => "COMPLETED",
        };
        f.write_str(name)
    }
}

/// Units of one resource type an incident needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceNeed {
    /// Resource type (e.g., "Fire Truck", "Ambulance").
    pub resource_type: String,
    /// Number of units.
    pub quantity: u32,
}

impl ResourceNeed {
    /// Creates a need, rejecting negative quantities.
    pub fn new(resource_type: impl Into<String>, quantity: i64) -> Result<Self> {
        let resource_type = resource_type.into();
        let quantity = u32::try_from(quantity).map_err(|_| DispatchError::NegativeQuantity {
            resource_type: resource_type.clone(),
            quantity,
        })?;
        Ok(Self {
            resource_type,
            quantity,
        })
    }
}

/// A reported emergency.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_dispatch::models::{Incident, IncidentType, Priority};
///
/// let at = NaiveDate::from_ymd_opt(2025, 5, 4).unwrap().and_hms_opt(8, 0, 0).unwrap();
/// let fire = Incident::new("INC-001", "B", at, IncidentType::Fire, Priority::Critical)
///     .with_need("Fire Truck", 2)
///     .with_need("Ambulance", 1);
///
/// assert_eq!(fire.estimated_duration, 120); // critical default
/// assert_eq!(fire.total_units(), 3);
/// assert!(fire.clone().with_duration(0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "IncidentRecord")]
pub struct Incident {
    /// Unique incident identifier.
    pub id: String,
    /// Location (graph vertex) of the incident.
    pub location: String,
    /// Report time; also the start of the response window.
    pub time: NaiveDateTime,
    /// Category.
    #[serde(rename = "type")]
    pub incident_type: IncidentType,
    /// Urgency level.
    pub priority: Priority,
    /// Units needed, in dispatch order.
    pub required_resources: Vec<ResourceNeed>,
    /// Free-text description.
    pub description: String,
    /// Expected response duration (minutes, > 0).
    pub estimated_duration: u32,
    /// Lifecycle status.
    pub status: IncidentStatus,
    /// When the incident was closed.
    pub completion_time: Option<NaiveDateTime>,
}

/// Wire shape of an [`Incident`], checked before it becomes one.
#[derive(Deserialize)]
struct IncidentRecord {
    id: String,
    location: String,
    time: NaiveDateTime,
    #[serde(rename = "type")]
    incident_type: IncidentType,
    priority: Priority,
    required_resources: Vec<ResourceNeed>,
    description: String,
    estimated_duration: u32,
    status: IncidentStatus,
    completion_time: Option<NaiveDateTime>,
}

impl TryFrom<IncidentRecord> for Incident {
    type Error = DispatchError;

    fn try_from(record: IncidentRecord) -> Result<Self> {
        if record.estimated_duration == 0 {
            return Err(DispatchError::NonPositiveDuration {
                incident_id: record.id,
                minutes: 0,
            });
        }
        Ok(Self {
            id: record.id,
            location: record.location,
            time: record.time,
            incident_type: record.incident_type,
            priority: record.priority,
            required_resources: record.required_resources,
            description: record.description,
            estimated_duration: record.estimated_duration,
            status: record.status,
            completion_time: record.completion_time,
        })
    }
}

impl Incident {
    /// Creates a pending incident whose duration defaults from its priority.
    pub fn new(
        id: impl Into<String>,
        location: impl Into<String>,
        time: NaiveDateTime,
        incident_type: IncidentType,
        priority: Priority,
    ) -> Self {
        Self {
            id: id.into(),
            location: location.into(),
            time,
            incident_type,
            priority,
            required_resources: Vec::new(),
            description: String::new(),
            estimated_duration: PriorityDurations::default().minutes(priority),
            status: IncidentStatus::Pending,
            completion_time: None,
        }
    }

    /// Sets the expected duration. Zero or negative minutes are rejected.
    pub fn with_duration(mut self, minutes: i64) -> Result<Self> {
        let Some(valid) = u32::try_from(minutes).ok().filter(|&m| m > 0) else {
            return Err(DispatchError::NonPositiveDuration {
                incident_id: self.id,
                minutes,
            });
        };
        self.estimated_duration = valid;
        Ok(self)
    }

    /// Adds a resource need.
    pub fn with_resource(mut self, need: ResourceNeed) -> Self {
        self.required_resources.push(need);
        self
    }

    /// Adds `quantity` units of `resource_type`.
    pub fn with_need(self, resource_type: impl Into<String>, quantity: u32) -> Self {
        self.with_resource(ResourceNeed {
            resource_type: resource_type.into(),
            quantity,
        })
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the status.
    pub fn with_status(mut self, status: IncidentStatus) -> Self {
        self.status = status;
        self
    }

    /// Expected end of the response (`time + estimated_duration`).
    ///
    /// Saturates at [`NaiveDateTime::MAX`].
    pub fn end_time(&self) -> NaiveDateTime {
        self.time
            .checked_add_signed(Duration::minutes(i64::from(self.estimated_duration)))
            .unwrap_or(NaiveDateTime::MAX)
    }

    /// Half-open response window `[time, end_time)`.
    pub fn window(&self) -> ResponseWindow {
        ResponseWindow::new(self.time, self.end_time())
    }

    /// Whether the incident is still waiting for units.
    pub fn is_pending(&self) -> bool {
        self.status == IncidentStatus::Pending
    }

    /// Total units requested across all types.
    pub fn total_units(&self) -> u32 {
        self.required_resources.iter().map(|n| n.quantity).sum()
    }

    /// Marks the incident completed at `at`.
    pub fn complete(&mut self, at: NaiveDateTime) {
        self.status = IncidentStatus::Completed;
        self.completion_time = Some(at);
    }

    /// Minutes from report to completion, if completed.
    pub fn response_minutes(&self) -> Option<f64> {
        self.completion_time
            .map(|done| (done - self.time).num_seconds() as f64 / 60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, 4)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_incident_builder() {
        let inc = Incident::new("I1", "B", at(8, 0), IncidentType::Medical, Priority::High)
            .with_need("Ambulance", 2)
            .with_description("Cardiac arrest")
            .with_duration(45)
            .unwrap();

        assert_eq!(inc.id, "I1");
        assert_eq!(inc.location, "B");
        assert_eq!(inc.estimated_duration, 45);
        assert_eq!(inc.status, IncidentStatus::Pending);
        assert_eq!(inc.required_resources[0].resource_type, "Ambulance");
        assert_eq!(inc.end_time(), at(8, 45));
        assert!(inc.is_pending());
    }

    #[test]
    fn test_default_duration_from_priority() {
        for (priority, minutes) in [
            (Priority::Critical, 120),
            (Priority::High, 90),
            (Priority::Medium, 60),
            (Priority::Low, 30),
            (Priority::Info, 15),
        ] {
            let inc = Incident::new("X", "A", at(0, 0), IncidentType::Fire, priority);
            assert_eq!(inc.estimated_duration, minutes);
        }
    }

    #[test]
    fn test_non_positive_duration_rejected() {
        let inc = Incident::new("I9", "A", at(1, 0), IncidentType::Crime, Priority::Low);
        let err = inc.clone().with_duration(0).unwrap_err();
        assert_eq!(
            err,
            DispatchError::NonPositiveDuration {
                incident_id: "I9".into(),
                minutes: 0
            }
        );
        assert!(inc.with_duration(-15).is_err());
    }

    #[test]
    fn test_negative_quantity_rejected() {
        assert!(ResourceNeed::new("Police Car", 0).is_ok());
        assert_eq!(ResourceNeed::new("Police Car", 3).unwrap().quantity, 3);
        assert!(matches!(
            ResourceNeed::new("Police Car", -1),
            Err(DispatchError::NegativeQuantity { quantity: -1, .. })
        ));
    }

    #[test]
    fn test_priority_order_and_values() {
        assert!(Priority::Critical > Priority::High);
        assert!(Priority::Info < Priority::Low);
        assert_eq!(Priority::Medium.value(), 3);
        assert_eq!(Priority::from_value(5), Some(Priority::Critical));
        assert_eq!(Priority::from_value(0), None);
        assert_eq!(Priority::High.to_string(), "HIGH");
    }

    #[test]
    fn test_complete_and_response_time() {
        let mut inc = Incident::new("I2", "D", at(14, 30), IncidentType::Fire, Priority::High);
        assert!(inc.response_minutes().is_none());

        inc.complete(at(16, 0));
        assert_eq!(inc.status, IncidentStatus::Completed);
        assert!((inc.response_minutes().unwrap() - 90.0).abs() < 1e-10);
    }

    #[test]
    fn test_window() {
        let inc = Incident::new("I3", "F", at(20, 45), IncidentType::Crime, Priority::Low);
        let w = inc.window();
        assert_eq!(w.start, at(20, 45));
        assert_eq!(w.end, at(21, 15));
    }

    #[test]
    fn test_serde_round_trip_shape() {
        let inc = Incident::new("I4", "A", at(2, 0), IncidentType::Hazmat, Priority::Critical)
            .with_need("Fire Truck", 1);
        let json = serde_json::to_value(&inc).unwrap();
        assert_eq!(json["type"], "Hazmat");
        assert_eq!(json["priority"], "CRITICAL");
        assert_eq!(json["status"], "PENDING");

        let back: Incident = serde_json::from_value(json).unwrap();
        assert_eq!(back, inc);
    }

    #[test]
    fn test_zero_duration_fails_deserialization() {
        let inc = Incident::new("I5", "B", at(3, 0), IncidentType::Medical, Priority::Low);
        let mut json = serde_json::to_value(&inc).unwrap();
        json["estimated_duration"] = serde_json::json!(0);

        let err = serde_json::from_value::<Incident>(json.clone()).unwrap_err();
        assert!(err.to_string().contains("I5"));
        assert!(err.to_string().contains("must be positive"));

        json["estimated_duration"] = serde_json::json!(25);
        let back: Incident = serde_json::from_value(json).unwrap();
        assert_eq!(back.estimated_duration, 25);
    }

    #[test]
    fn test_end_time_saturates() {
        let late = NaiveDateTime::MAX - Duration::minutes(5);
        let inc = Incident::new("I6", "A", late, IncidentType::Fire, Priority::Critical);
        assert_eq!(inc.end_time(), NaiveDateTime::MAX);
        assert_eq!(inc.window().end, NaiveDateTime::MAX);

        let normal = Incident::new("I7", "A", at(1, 0), IncidentType::Fire, Priority::Critical);
        assert_eq!(normal.end_time(), at(3, 0));
    }

    #[test]
    fn test_type_labels() {
        assert_eq!(IncidentType::Traffic.to_string(), "Traffic Accident");
        assert_eq!(IncidentType::ALL.len(), 6);
    }
}
