//! Allocation plan (solution) model.
//!
//! The outcome of one allocation pass: for every incident, in the order
//! it was served, one [`Assignment`] per requested unit. Units that could
//! not be found anywhere are recorded as unfulfilled assignments rather
//! than errors.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One requested unit and where it comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Resource type of the unit.
    pub resource_type: String,
    /// Location the unit is dispatched from. `None` = no unit available.
    pub source: Option<String>,
    /// Travel time from source to incident (minutes).
    pub travel_cost: Option<f64>,
    /// Route from source to incident; empty when unfulfilled.
    pub route: Vec<String>,
}

impl Assignment {
    /// A committed unit.
    pub fn dispatched(
        resource_type: impl Into<String>,
        source: impl Into<String>,
        travel_cost: f64,
        route: Vec<String>,
    ) -> Self {
        Self {
            resource_type: resource_type.into(),
            source: Some(source.into()),
            travel_cost: Some(travel_cost),
            route,
        }
    }

    /// A unit that could not be found.
    pub fn unfulfilled(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            source: None,
            travel_cost: None,
            route: Vec::new(),
        }
    }

    /// Whether a unit was committed.
    #[inline]
    pub fn is_fulfilled(&self) -> bool {
        self.source.is_some()
    }
}

/// All assignments made for one incident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentAllocation {
    /// Incident identifier.
    pub incident_id: String,
    /// Incident location.
    pub location: String,
    /// One entry per requested unit, in request order.
    pub assignments: Vec<Assignment>,
}

impl IncidentAllocation {
    /// Whether every requested unit was committed.
    pub fn is_fully_served(&self) -> bool {
        self.assignments.iter().all(Assignment::is_fulfilled)
    }

    /// Travel time of the slowest committed unit (minutes).
    pub fn arrival_minutes(&self) -> Option<f64> {
        self.assignments
            .iter()
            .filter_map(|a| a.travel_cost)
            .reduce(f64::max)
    }
}

/// Result of one allocation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationPlan {
    /// Per-incident allocations, in service order.
    pub incidents: Vec<IncidentAllocation>,
}

impl AllocationPlan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an incident's allocation.
    pub fn push(&mut self, allocation: IncidentAllocation) {
        self.incidents.push(allocation);
    }

    /// Allocation for one incident.
    pub fn for_incident(&self, incident_id: &str) -> Option<&IncidentAllocation> {
        self.incidents.iter().find(|a| a.incident_id == incident_id)
    }

    /// All assignments across incidents.
    pub fn assignments(&self) -> impl Iterator<Item = &Assignment> {
        self.incidents.iter().flat_map(|a| a.assignments.iter())
    }

    /// Number of requested units that could not be found.
    pub fn unfulfilled_count(&self) -> usize {
        self.assignments().filter(|a| !a.is_fulfilled()).count()
    }

    /// Number of committed units.
    pub fn dispatched_count(&self) -> usize {
        self.assignments().filter(|a| a.is_fulfilled()).count()
    }

    /// Sum of travel times of every committed unit (minutes).
    pub fn total_response_minutes(&self) -> f64 {
        self.assignments().filter_map(|a| a.travel_cost).sum()
    }

    /// Incident locations plus every location a unit left from.
    pub fn locations_visited(&self) -> BTreeSet<&str> {
        let mut visited = BTreeSet::new();
        for alloc in &self.incidents {
            visited.insert(alloc.location.as_str());
            for a in &alloc.assignments {
                if let Some(src) = &a.source {
                    visited.insert(src.as_str());
                }
            }
        }
        visited
    }

    /// Whether every incident was fully served.
    pub fn is_complete(&self) -> bool {
        self.unfulfilled_count() == 0
    }
}
