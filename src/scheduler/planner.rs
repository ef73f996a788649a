//! Incident board: the working set of incidents and the orderings and
//! selections computed over it.
//!
//! # Orderings
//!
//! | Method | Key | Direction |
//! |--------|-----|-----------|
//! | `sort_by_priority` | priority | most urgent first |
//! | `sort_by_time` | report time | oldest first |
//! | `sort_by_location` | location name | lexicographic |
//! | `pending` | (priority, time) | most urgent, then oldest |
//!
//! `pending` always uses the stable merge sort so equal keys keep their
//! insertion order; the others take the strategy as an argument.

use std::cmp::Reverse;

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{debug, info};

use super::{
    activity_selection, activity_selection_indices, knapsack_indices, knapsack_selection,
    IncidentReport, SortStrategy,
};
use crate::config::DispatchConfig;
use crate::models::{Incident, IncidentStatus, IncidentType, Priority};

/// Both selections computed over the pending view.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseSchedule<'a> {
    /// Maximum number of non-overlapping incidents.
    pub activity_selection: Vec<&'a Incident>,
    /// Maximum total priority within the time budget.
    pub knapsack: Vec<&'a Incident>,
}

/// Holds incidents and answers ordering and selection queries.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_dispatch::models::{Incident, IncidentType, Priority};
/// use u_dispatch::scheduler::IncidentScheduler;
///
/// let t = |h| NaiveDate::from_ymd_opt(2025, 5, 4).unwrap().and_hms_opt(h, 0, 0).unwrap();
///
/// let mut board = IncidentScheduler::new();
/// board.add(Incident::new("I1", "A", t(9), IncidentType::Crime, Priority::Low));
/// board.add(Incident::new("I2", "B", t(8), IncidentType::Fire, Priority::Critical));
/// board.add(Incident::new("I3", "C", t(7), IncidentType::Medical, Priority::Critical));
///
/// let ids: Vec<&str> = board.pending().iter().map(|i| i.id.as_str()).collect();
/// assert_eq!(ids, vec!["I3", "I2", "I1"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct IncidentScheduler {
    incidents: Vec<Incident>,
    config: DispatchConfig,
}

impl IncidentScheduler {
    /// Creates an empty board with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: DispatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Adds incidents in order.
    pub fn with_incidents(mut self, incidents: impl IntoIterator<Item = Incident>) -> Self {
        for incident in incidents {
            self.add(incident);
        }
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Adds an incident to the board.
    pub fn add(&mut self, incident: Incident) {
        info!(
            id = %incident.id,
            location = %incident.location,
            priority = %incident.priority,
            "incident reported"
        );
        self.incidents.push(incident);
    }

    /// Creates and adds an incident whose duration comes from the
    /// configured per-priority defaults.
    pub fn create_incident(
        &mut self,
        id: impl Into<String>,
        location: impl Into<String>,
        time: NaiveDateTime,
        incident_type: IncidentType,
        priority: Priority,
    ) -> &mut Incident {
        let mut incident = Incident::new(id, location, time, incident_type, priority);
        incident.estimated_duration = self.config.default_duration(priority);
        self.add(incident);
        let last = self.incidents.len() - 1;
        &mut self.incidents[last]
    }

    /// All incidents in insertion order.
    pub fn incidents(&self) -> &[Incident] {
        &self.incidents
    }

    /// Incident by id.
    pub fn get(&self, id: &str) -> Option<&Incident> {
        self.incidents.iter().find(|i| i.id == id)
    }

    /// Mutable incident by id.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Incident> {
        self.incidents.iter_mut().find(|i| i.id == id)
    }

    /// Sets an incident's status. Returns `false` for an unknown id.
    pub fn set_status(&mut self, id: &str, status: IncidentStatus) -> bool {
        match self.get_mut(id) {
            Some(incident) => {
                debug!(id, %status, "status changed");
                incident.status = status;
                true
            }
            None => false,
        }
    }

    /// Removes an incident by id.
    pub fn remove(&mut self, id: &str) -> Option<Incident> {
        let pos = self.incidents.iter().position(|i| i.id == id)?;
        Some(self.incidents.remove(pos))
    }

    /// Number of incidents.
    pub fn len(&self) -> usize {
        self.incidents.len()
    }

    /// Whether the board is empty.
    pub fn is_empty(&self) -> bool {
        self.incidents.is_empty()
    }

    /// Incidents of one category.
    pub fn by_type(&self, incident_type: IncidentType) -> Vec<&Incident> {
        self.incidents
            .iter()
            .filter(|i| i.incident_type == incident_type)
            .collect()
    }

    /// Incidents with one status.
    pub fn by_status(&self, status: IncidentStatus) -> Vec<&Incident> {
        self.incidents.iter().filter(|i| i.status == status).collect()
    }

    /// Incidents with one priority.
    pub fn by_priority(&self, priority: Priority) -> Vec<&Incident> {
        self.incidents
            .iter()
            .filter(|i| i.priority == priority)
            .collect()
    }

    /// Pending incidents, most urgent first, then oldest first.
    pub fn pending(&self) -> Vec<&Incident> {
        let pending = self.by_status(IncidentStatus::Pending);
        SortStrategy::Merge
            .sorted(&pending, |i| (Reverse(i.priority), i.time))
            .into_iter()
            .copied()
            .collect()
    }

    /// All incidents, most urgent first.
    pub fn sort_by_priority(&self, strategy: SortStrategy) -> Vec<&Incident> {
        strategy.sorted(&self.incidents, |i| Reverse(i.priority))
    }

    /// All incidents, oldest first.
    pub fn sort_by_time(&self, strategy: SortStrategy) -> Vec<&Incident> {
        strategy.sorted(&self.incidents, |i| i.time)
    }

    /// All incidents by location name.
    pub fn sort_by_location(&self, strategy: SortStrategy) -> Vec<&Incident> {
        strategy.sorted(&self.incidents, |i| i.location.as_str())
    }

    /// Most urgent first using the configured strategy.
    pub fn prioritized(&self) -> Vec<&Incident> {
        self.sort_by_priority(self.config.sort_strategy)
    }

    /// Greedy activity selection over every incident.
    pub fn activity_selection(&self) -> Vec<&Incident> {
        activity_selection(&self.incidents)
    }

    /// Knapsack selection over every incident.
    pub fn knapsack_selection(&self, budget_minutes: i64) -> Vec<&Incident> {
        knapsack_selection(&self.incidents, budget_minutes)
    }

    /// Both selections over the pending view.
    pub fn schedule_optimal_response(&self, budget_minutes: i64) -> ResponseSchedule<'_> {
        let pending = self.pending();
        let schedule = ResponseSchedule {
            activity_selection: activity_selection_indices(&pending)
                .into_iter()
                .map(|i| pending[i])
                .collect(),
            knapsack: knapsack_indices(&pending, budget_minutes)
                .into_iter()
                .map(|i| pending[i])
                .collect(),
        };
        info!(
            pending = pending.len(),
            budget_minutes,
            activity = schedule.activity_selection.len(),
            knapsack = schedule.knapsack.len(),
            "response schedule computed"
        );
        schedule
    }

    /// [`schedule_optimal_response`](Self::schedule_optimal_response) with
    /// the configured budget.
    pub fn schedule_with_budget(&self) -> ResponseSchedule<'_> {
        self.schedule_optimal_response(self.config.time_budget_minutes)
    }

    /// Summary statistics.
    pub fn statistics(&self) -> IncidentReport {
        IncidentReport::calculate(&self.incidents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PriorityDurations;
    use chrono::{Duration, NaiveDate};

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, 4)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    /// Five incidents across the sample city.
    fn board() -> IncidentScheduler {
        IncidentScheduler::new().with_incidents([
            Incident::new("INC-001", "B", at(8, 0), IncidentType::Fire, Priority::Critical)
                .with_need("Fire Truck", 2),
            Incident::new("INC-002", "D", at(8, 30), IncidentType::Medical, Priority::High)
                .with_need("Ambulance", 1),
            Incident::new("INC-003", "A", at(9, 0), IncidentType::Traffic, Priority::Medium),
            Incident::new("INC-004", "C", at(7, 45), IncidentType::Crime, Priority::High)
                .with_status(IncidentStatus::Completed),
            Incident::new("INC-005", "HQ", at(9, 15), IncidentType::Fire, Priority::High),
        ])
    }

    fn ids<'a>(list: &[&'a Incident]) -> Vec<&'a str> {
        list.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_filters() {
        let b = board();
        assert_eq!(b.len(), 5);
        assert_eq!(ids(&b.by_type(IncidentType::Fire)), vec!["INC-001", "INC-005"]);
        assert_eq!(ids(&b.by_status(IncidentStatus::Completed)), vec!["INC-004"]);
        assert_eq!(
            ids(&b.by_priority(Priority::High)),
            vec!["INC-002", "INC-004", "INC-005"]
        );
        assert!(b.by_type(IncidentType::Hazmat).is_empty());
    }

    #[test]
    fn test_pending_order() {
        let b = board();
        // Completed INC-004 drops out; highs ordered by time.
        assert_eq!(
            ids(&b.pending()),
            vec!["INC-001", "INC-002", "INC-005", "INC-003"]
        );
    }

    #[test]
    fn test_pending_ties_keep_insertion_order() {
        let b = IncidentScheduler::new().with_incidents([
            Incident::new("X", "A", at(8, 0), IncidentType::Fire, Priority::Low),
            Incident::new("Y", "B", at(8, 0), IncidentType::Fire, Priority::Low),
            Incident::new("Z", "C", at(8, 0), IncidentType::Fire, Priority::Low),
        ]);
        assert_eq!(ids(&b.pending()), vec!["X", "Y", "Z"]);
    }

    #[test]
    fn test_sort_by_time_and_location() {
        let b = board();
        for strategy in SortStrategy::ALL {
            assert_eq!(
                ids(&b.sort_by_time(strategy)),
                vec!["INC-004", "INC-001", "INC-002", "INC-003", "INC-005"]
            );
            assert_eq!(
                ids(&b.sort_by_location(strategy)),
                vec!["INC-003", "INC-001", "INC-004", "INC-002", "INC-005"]
            );
        }
    }

    #[test]
    fn test_sort_by_priority_strategies_agree_on_keys() {
        let b = board();
        let merge = b.sort_by_priority(SortStrategy::Merge);
        assert_eq!(
            ids(&merge),
            vec!["INC-001", "INC-002", "INC-004", "INC-005", "INC-003"]
        );
        for strategy in [SortStrategy::Quick, SortStrategy::Heap] {
            let keys: Vec<Priority> = b.sort_by_priority(strategy).iter().map(|i| i.priority).collect();
            let expected: Vec<Priority> = merge.iter().map(|i| i.priority).collect();
            assert_eq!(keys, expected);
        }
    }

    #[test]
    fn test_schedule_optimal_response_uses_pending_view() {
        let b = board();
        let schedule = b.schedule_optimal_response(300);

        assert!(schedule.knapsack.iter().all(|i| i.is_pending()));
        assert!(schedule.activity_selection.iter().all(|i| i.is_pending()));

        // Pending: 120 (5), 90 (4), 60 (3), 90 (4) minutes.
        let value: u32 = schedule.knapsack.iter().map(|i| i.priority.value()).sum();
        let minutes: u32 = schedule.knapsack.iter().map(|i| i.estimated_duration).sum();
        assert_eq!(value, 13);
        assert!(minutes <= 300);

        // Every pending window covers 09:15-10:00; ties on end time keep pending order.
        assert_eq!(ids(&schedule.activity_selection), vec!["INC-001"]);
    }

    #[test]
    fn test_create_incident_uses_configured_durations() {
        let config = DispatchConfig::new().with_priority_durations(PriorityDurations {
            critical: 200,
            ..PriorityDurations::default()
        });
        let mut b = IncidentScheduler::new().with_config(config);
        let created = b.create_incident("I1", "A", at(1, 0), IncidentType::Hazmat, Priority::Critical);
        assert_eq!(created.estimated_duration, 200);
        created.required_resources.push(crate::models::ResourceNeed::new("Fire Truck", 1).unwrap());

        assert_eq!(b.get("I1").unwrap().total_units(), 1);
        assert_eq!(b.get("I1").unwrap().end_time(), at(1, 0) + Duration::minutes(200));
    }

    #[test]
    fn test_status_updates_and_removal() {
        let mut b = board();
        assert!(b.set_status("INC-001", IncidentStatus::Assigned));
        assert!(!b.set_status("nope", IncidentStatus::Assigned));
        assert_eq!(b.pending().len(), 3);

        let removed = b.remove("INC-003").unwrap();
        assert_eq!(removed.location, "A");
        assert!(b.get("INC-003").is_none());
        assert!(b.remove("INC-003").is_none());
        assert_eq!(b.len(), 4);
    }

    #[test]
    fn test_prioritized_uses_config_strategy() {
        let b = board().with_config(DispatchConfig::new().with_sort_strategy(SortStrategy::Heap));
        assert_eq!(b.config().sort_strategy, SortStrategy::Heap);
        assert_eq!(b.prioritized()[0].priority, Priority::Critical);
        assert_eq!(b.prioritized().last().unwrap().priority, Priority::Medium);
    }
}
