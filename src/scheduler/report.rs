//! Incident statistics.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Breakdowns | Incident counts by status, type, and priority |
//! | Completed | Incidents with status COMPLETED |
//! | Avg Response | Mean(completion - report time) over completed incidents, minutes |
//! | Pending | Incidents still waiting for units |

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Incident, IncidentStatus, IncidentType, Priority};

/// Summary of an incident list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncidentReport {
    /// Number of incidents.
    pub total_incidents: usize,
    /// Count per status.
    pub status_breakdown: BTreeMap<IncidentStatus, usize>,
    /// Count per category.
    pub type_breakdown: BTreeMap<IncidentType, usize>,
    /// Count per priority.
    pub priority_breakdown: BTreeMap<Priority, usize>,
    /// Incidents with status COMPLETED and a completion time.
    pub completed_incidents: usize,
    /// Mean response time in minutes, rounded to 2 decimals (0 if none).
    pub average_response_minutes: f64,
    /// Incidents with status PENDING.
    pub pending_incidents: usize,
}

impl IncidentReport {
    /// Computes the report.
    ///
    /// Only completed incidents with a recorded completion time count as
    /// completed; the rest still appear under `COMPLETED` in the status
    /// breakdown.
    pub fn calculate(incidents: &[Incident]) -> Self {
        let mut status_breakdown = BTreeMap::new();
        let mut type_breakdown = BTreeMap::new();
        let mut priority_breakdown = BTreeMap::new();
        let mut completed = 0usize;
        let mut total_response = 0.0;

        for incident in incidents {
            *status_breakdown.entry(incident.status).or_insert(0) += 1;
            *type_breakdown.entry(incident.incident_type).or_insert(0) += 1;
            *priority_breakdown.entry(incident.priority).or_insert(0) += 1;

            if incident.status != IncidentStatus::Completed {
                continue;
            }
            if let Some(minutes) = incident.response_minutes() {
                total_response += minutes;
                completed += 1;
            }
        }

        let average_response_minutes = if completed == 0 {
            0.0
        } else {
            (total_response / completed as f64 * 100.0).round() / 100.0
        };

        Self {
            total_incidents: incidents.len(),
            pending_incidents: status_breakdown
                .get(&IncidentStatus::Pending)
                .copied()
                .unwrap_or(0),
            status_breakdown,
            type_breakdown,
            priority_breakdown,
            completed_incidents: completed,
            average_response_minutes,
        }
    }

    /// Count for one status.
    pub fn with_status(&self, status: IncidentStatus) -> usize {
        self.status_breakdown.get(&status).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, 4)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_report_basic() {
        let mut fire = Incident::new("I1", "B", at(8, 0), IncidentType::Fire, Priority::Critical);
        fire.complete(at(9, 30)); // 90 min
        let mut crash = Incident::new("I2", "C", at(10, 0), IncidentType::Traffic, Priority::Medium);
        crash.complete(at(10, 20)); // 20 min
        let call = Incident::new("I3", "D", at(11, 0), IncidentType::Fire, Priority::High);

        let report = IncidentReport::calculate(&[fire, crash, call]);
        assert_eq!(report.total_incidents, 3);
        assert_eq!(report.completed_incidents, 2);
        assert_eq!(report.pending_incidents, 1);
        assert_eq!(report.type_breakdown[&IncidentType::Fire], 2);
        assert_eq!(report.priority_breakdown[&Priority::Medium], 1);
        assert_eq!(report.with_status(IncidentStatus::Assigned), 0);
        assert!((report.average_response_minutes - 55.0).abs() < 1e-10);
    }

    #[test]
    fn test_average_rounded() {
        let mut a = Incident::new("I1", "A", at(8, 0), IncidentType::Medical, Priority::High);
        a.complete(at(8, 0) + chrono::Duration::seconds(610)); // 10.1666..
        let report = IncidentReport::calculate(&[a]);
        assert!((report.average_response_minutes - 10.17).abs() < 1e-10);
    }

    #[test]
    fn test_completed_without_time() {
        let inc = Incident::new("I1", "A", at(8, 0), IncidentType::Crime, Priority::Low)
            .with_status(IncidentStatus::Completed);
        let mut timed = Incident::new("I2", "B", at(8, 0), IncidentType::Crime, Priority::Low);
        timed.complete(at(8, 30));

        let report = IncidentReport::calculate(&[inc, timed]);
        assert_eq!(report.completed_incidents, 1);
        assert_eq!(report.status_breakdown[&IncidentStatus::Completed], 2);
        assert!((report.average_response_minutes - 30.0).abs() < 1e-10);
    }

    #[test]
    fn test_report_empty() {
        let report = IncidentReport::calculate(&[]);
        assert_eq!(report.total_incidents, 0);
        assert_eq!(report.pending_incidents, 0);
        assert!(report.status_breakdown.is_empty());
        assert!((report.average_response_minutes - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_report_serializes() {
        let inc = Incident::new("I1", "A", at(8, 0), IncidentType::Hazmat, Priority::Critical);
        let json = serde_json::to_value(IncidentReport::calculate(&[inc])).unwrap();
        assert_eq!(json["status_breakdown"]["PENDING"], 1);
        assert_eq!(json["type_breakdown"]["Hazmat"], 1);
        assert_eq!(json["priority_breakdown"]["CRITICAL"], 1);
    }
}
