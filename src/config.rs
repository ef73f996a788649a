//! Engine configuration.
//!
//! Every field has a default, so a partial (or empty) document
//! deserializes:
//!
//! ```
//! use u_dispatch::config::DispatchConfig;
//! use u_dispatch::graph::MstStrategy;
//! use u_dispatch::scheduler::SortStrategy;
//!
//! let config: DispatchConfig =
//!     serde_json::from_str(r#"{ "sort_strategy": "Heap", "time_budget_minutes": 240 }"#).unwrap();
//!
//! assert_eq!(config.sort_strategy, SortStrategy::Heap);
//! assert_eq!(config.mst_strategy, MstStrategy::Prim);
//! assert_eq!(config.time_budget_minutes, 240);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{DispatchError, Result};
use crate::graph::{MstStrategy, SpanningTree, WeightedGraph};
use crate::models::{Priority, PriorityDurations};
use crate::scheduler::SortStrategy;

/// Dispatch engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Sort algorithm for incident orderings.
    pub sort_strategy: SortStrategy,
    /// Spanning tree algorithm for infrastructure planning.
    pub mst_strategy: MstStrategy,
    /// Knapsack time budget (minutes).
    pub time_budget_minutes: i64,
    /// Default response duration per priority.
    pub priority_durations: PriorityDurations,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            sort_strategy: SortStrategy::default(),
            mst_strategy: MstStrategy::default(),
            time_budget_minutes: 300,
            priority_durations: PriorityDurations::default(),
        }
    }
}

impl DispatchConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sort strategy.
    pub fn with_sort_strategy(mut self, strategy: SortStrategy) -> Self {
        self.sort_strategy = strategy;
        self
    }

    /// Sets the spanning tree strategy.
    pub fn with_mst_strategy(mut self, strategy: MstStrategy) -> Self {
        self.mst_strategy = strategy;
        self
    }

    /// Sets the knapsack time budget.
    pub fn with_time_budget(mut self, minutes: i64) -> Self {
        self.time_budget_minutes = minutes;
        self
    }

    /// Sets the per-priority default durations.
    pub fn with_priority_durations(mut self, durations: PriorityDurations) -> Self {
        self.priority_durations = durations;
        self
    }

    /// Default duration for a priority (minutes).
    pub fn default_duration(&self, priority: Priority) -> u32 {
        self.priority_durations.minutes(priority)
    }

    /// Infrastructure plan built with the configured strategy.
    pub fn spanning_tree(&self, graph: &WeightedGraph) -> SpanningTree {
        self.mst_strategy.build(graph)
    }

    /// Rejects a negative budget and any zero default duration.
    pub fn validate(&self) -> Result<()> {
        if self.time_budget_minutes < 0 {
            return Err(DispatchError::InvalidConfig(format!(
                "time_budget_minutes must be >= 0, got {}",
                self.time_budget_minutes
            )));
        }
        for priority in Priority::ALL {
            if self.default_duration(priority) == 0 {
                return Err(DispatchError::InvalidConfig(format!(
                    "default duration for {priority} must be positive"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DispatchConfig::default();
        assert_eq!(config.sort_strategy, SortStrategy::Merge);
        assert_eq!(config.mst_strategy, MstStrategy::Prim);
        assert_eq!(config.time_budget_minutes, 300);
        assert_eq!(config.default_duration(Priority::Critical), 120);
        assert_eq!(config.default_duration(Priority::Info), 15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = DispatchConfig::new()
            .with_sort_strategy(SortStrategy::Quick)
            .with_mst_strategy(MstStrategy::Kruskal)
            .with_time_budget(90);
        assert_eq!(config.sort_strategy, SortStrategy::Quick);
        assert_eq!(config.mst_strategy, MstStrategy::Kruskal);
        assert_eq!(config.time_budget_minutes, 90);
    }

    #[test]
    fn test_spanning_tree_follows_strategy() {
        let city = crate::graph::sample_city();
        let prim = DispatchConfig::new().spanning_tree(&city);
        let kruskal = DispatchConfig::new()
            .with_mst_strategy(MstStrategy::Kruskal)
            .spanning_tree(&city);
        assert!((prim.total_weight - 18.0).abs() < 1e-10);
        assert!((kruskal.total_weight - 18.0).abs() < 1e-10);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let negative = DispatchConfig::new().with_time_budget(-1);
        assert!(matches!(negative.validate(), Err(DispatchError::InvalidConfig(_))));

        let zero = DispatchConfig::new().with_priority_durations(PriorityDurations {
            low: 0,
            ..PriorityDurations::default()
        });
        let err = zero.validate().unwrap_err();
        assert!(err.to_string().contains("LOW"));
    }

    #[test]
    fn test_unknown_strategy_fails_deserialization() {
        let err = serde_json::from_str::<DispatchConfig>(r#"{ "mst_strategy": "boruvka" }"#)
            .unwrap_err();
        assert!(err.to_string().contains("boruvka"));

        assert!(serde_json::from_str::<DispatchConfig>(r#"{ "sort_strategy": "bogo" }"#).is_err());
    }

    #[test]
    fn test_partial_durations() {
        let config: DispatchConfig =
            serde_json::from_str(r#"{ "priority_durations": { "critical": 180 } }"#).unwrap();
        assert_eq!(config.default_duration(Priority::Critical), 180);
        assert_eq!(config.default_duration(Priority::High), 90);
    }

    #[test]
    fn test_serializes_strategy_names() {
        let json = serde_json::to_value(DispatchConfig::default()).unwrap();
        assert_eq!(json["sort_strategy"], "merge");
        assert_eq!(json["mst_strategy"], "prim");
    }
}
