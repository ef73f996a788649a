//! Input validation for dispatch problems.
//!
//! Checks structural integrity of incidents, inventories, and the city
//! graph before an allocation pass. Detects:
//! - Duplicate or empty incident IDs
//! - Incidents and units at locations missing from the graph
//! - Non-positive incident durations
//! - Negative or non-finite travel times
//!
//! Every problem is reported, not only the first.

use std::collections::HashSet;

use crate::graph::WeightedGraph;
use crate::models::{Incident, ResourceInventory};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two incidents share the same ID.
    DuplicateId,
    /// An incident has an empty ID.
    EmptyId,
    /// A location is not a vertex of the graph.
    UnknownLocation,
    /// An incident duration is zero.
    NonPositiveDuration,
    /// A travel time is negative, NaN, or infinite.
    InvalidWeight,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates incidents against the city graph.
///
/// Checks:
/// 1. No empty incident IDs
/// 2. No duplicate incident IDs
/// 3. Every incident location is a vertex
/// 4. Every estimated duration is positive
pub fn validate_incidents(incidents: &[Incident], graph: &WeightedGraph) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for incident in incidents {
        if incident.id.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyId,
                format!("Incident at '{}' has an empty ID", incident.location),
            ));
        } else if !ids.insert(incident.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate incident ID: {}", incident.id),
            ));
        }

        if !graph.contains(&incident.location) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownLocation,
                format!(
                    "Incident '{}' is at unknown location '{}'",
                    incident.id, incident.location
                ),
            ));
        }

        if incident.estimated_duration == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveDuration,
                format!("Incident '{}' has a zero duration", incident.id),
            ));
        }
    }

    finish(errors)
}

/// Validates that every stocked location is a vertex.
pub fn validate_inventory(inventory: &ResourceInventory, graph: &WeightedGraph) -> ValidationResult {
    let errors = inventory
        .locations()
        .filter(|loc| !graph.contains(loc))
        .map(|loc| {
            ValidationError::new(
                ValidationErrorKind::UnknownLocation,
                format!("Inventory stocks units at unknown location '{loc}'"),
            )
        })
        .collect();
    finish(errors)
}

/// Validates that every travel time is finite and non-negative.
pub fn validate_graph(graph: &WeightedGraph) -> ValidationResult {
    let errors = graph
        .edges()
        .into_iter()
        .filter(|&(_, _, w)| !w.is_finite() || w < 0.0)
        .map(|(a, b, w)| {
            ValidationError::new(
                ValidationErrorKind::InvalidWeight,
                format!("Edge {a} -- {b} has invalid travel time {w}"),
            )
        })
        .collect();
    finish(errors)
}

/// Runs every check and merges the findings.
pub fn validate_input(
    incidents: &[Incident],
    inventory: &ResourceInventory,
    graph: &WeightedGraph,
) -> ValidationResult {
    let mut errors = Vec::new();
    for result in [
        validate_graph(graph),
        validate_incidents(incidents, graph),
        validate_inventory(inventory, graph),
    ] {
        if let Err(found) = result {
            errors.extend(found);
        }
    }
    finish(errors)
}
