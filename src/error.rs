//! Crate error type.
//!
//! Only structural problems are errors: bad strategy names, invalid
//! configuration, and value objects built from out-of-range inputs.
//! Unreachable destinations and unsatisfiable resource requests are
//! ordinary results (see [`crate::graph::Route`] and
//! [`crate::allocation::Assignment`]).

use thiserror::Error;

/// Errors raised by the dispatch engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    /// A sort strategy name that is not merge, quick, or heap.
    #[error("unknown sort strategy '{0}' (expected merge, quick or heap)")]
    UnknownSortStrategy(String),

    /// A spanning-tree strategy name that is not prim or kruskal.
    #[error("unknown spanning tree strategy '{0}' (expected prim or kruskal)")]
    UnknownMstStrategy(String),

    /// A resource need built with a negative unit count.
    #[error("resource '{resource_type}' quantity cannot be negative (got {quantity})")]
    NegativeQuantity {
        /// Resource type of the rejected need.
        resource_type: String,
        /// The offending quantity.
        quantity: i64,
    },

    /// An incident duration that is zero or negative.
    #[error("incident '{incident_id}' duration must be positive (got {minutes} min)")]
    NonPositiveDuration {
        /// Incident the duration belongs to.
        incident_id: String,
        /// The offending duration in minutes.
        minutes: i64,
    },

    /// Attempted to take a unit from an empty inventory slot.
    #[error("no '{resource_type}' unit available at '{location}'")]
    Unavailable {
        /// Location of the empty slot.
        location: String,
        /// Resource type requested.
        resource_type: String,
    },

    /// Configuration values out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, DispatchError>;
