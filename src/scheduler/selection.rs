//! Incident subset selection.
//!
//! # Algorithms
//!
//! - **Activity selection**: greedy earliest-finish interval scheduling.
//!   Maximizes the *number* of non-overlapping response windows, ignoring
//!   priority.
//! - **0/1 knapsack**: dynamic programming over integer minutes. Maximizes
//!   the summed [`Priority::value`](crate::models::Priority::value) of the
//!   chosen incidents subject to total duration within a budget.
//!
//! Both accept any slice whose elements borrow as an [`Incident`], so they
//! run on owned lists and on filtered views (`Vec<&Incident>`) alike.
//!
//! # Complexity
//! Activity selection: O(n log n). Knapsack: O(n * budget) time and space.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 16.1 (activity
//! selection), Ch. 16.2 / Kellerer et al. (2004) "Knapsack Problems" (0/1 DP)

use std::borrow::Borrow;

use chrono::NaiveDateTime;

use super::SortStrategy;
use crate::models::Incident;

/// Greedy activity selection by earliest end time.
///
/// Incidents are ordered by [`Incident::end_time`] with a stable merge
/// sort; an incident is taken when it starts at or after the end of the
/// last one taken. Touching windows (`start == last_end`) do not overlap.
pub fn activity_selection<I: Borrow<Incident>>(incidents: &[I]) -> Vec<&Incident> {
    activity_selection_indices(incidents)
        .into_iter()
        .map(|i| incidents[i].borrow())
        .collect()
}

/// Indices chosen by [`activity_selection`], in end-time order.
pub fn activity_selection_indices<I: Borrow<Incident>>(incidents: &[I]) -> Vec<usize> {
    let by_end = SortStrategy::Merge.sort_indices(incidents, |i| i.borrow().end_time());

    let mut selected = Vec::new();
    let mut last_end: Option<NaiveDateTime> = None;
    for idx in by_end {
        let incident = incidents[idx].borrow();
        if last_end.map_or(true, |end| incident.time >= end) {
            last_end = Some(incident.end_time());
            selected.push(idx);
        }
    }
    selected
}

/// 0/1 knapsack over response durations.
///
/// Weight = `estimated_duration` (minutes), value = priority value.
/// Returns the optimal subset in the input order. A budget ≤ 0 or an
/// empty list selects nothing.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_dispatch::models::{Incident, IncidentType, Priority};
/// use u_dispatch::scheduler::knapsack_selection;
///
/// let t = NaiveDate::from_ymd_opt(2025, 5, 4).unwrap().and_hms_opt(8, 0, 0).unwrap();
/// let incidents = vec![
///     Incident::new("I1", "A", t, IncidentType::Fire, Priority::Critical), // 120 min
///     Incident::new("I2", "B", t, IncidentType::Medical, Priority::High),  //  90 min
///     Incident::new("I3", "C", t, IncidentType::Crime, Priority::Low),     //  30 min
/// ];
///
/// let chosen = knapsack_selection(&incidents, 150);
/// let ids: Vec<&str> = chosen.iter().map(|i| i.id.as_str()).collect();
/// assert_eq!(ids, vec!["I1", "I3"]); // 5 + 2 beats 4 + 2
/// ```
pub fn knapsack_selection<I: Borrow<Incident>>(incidents: &[I], budget_minutes: i64) -> Vec<&Incident> {
    knapsack_indices(incidents, budget_minutes)
        .into_iter()
        .map(|i| incidents[i].borrow())
        .collect()
}

/// Indices chosen by [`knapsack_selection`], ascending.
pub fn knapsack_indices<I: Borrow<Incident>>(incidents: &[I], budget_minutes: i64) -> Vec<usize> {
    let Ok(budget) = usize::try_from(budget_minutes) else {
        return Vec::new();
    };
    if budget == 0 || incidents.is_empty() {
        return Vec::new();
    }

    let n = incidents.len();
    let weights: Vec<usize> = incidents
        .iter()
        .map(|i| i.borrow().estimated_duration as usize)
        .collect();
    // Minutes beyond the total duration never change the answer.
    let capacity = budget.min(weights.iter().sum());
    if capacity == 0 {
        return Vec::new();
    }
    let values: Vec<u64> = incidents
        .iter()
        .map(|i| u64::from(i.borrow().priority.value()))
        .collect();

    // dp[i][w]: best value using the first i incidents within w minutes.
    let mut dp = vec![vec![0u64; capacity + 1]; n + 1];
    for i in 1..=n {
        let (weight, value) = (weights[i - 1], values[i - 1]);
        for w in 0..=capacity {
            dp[i][w] = if weight <= w {
                (value + dp[i - 1][w - weight]).max(dp[i - 1][w])
            } else {
                dp[i - 1][w]
            };
        }
    }

    let mut chosen = Vec::new();
    let mut w = capacity;
    for i in (1..=n).rev() {
        if dp[i][w] != dp[i - 1][w] {
            chosen.push(i - 1);
            w -= weights[i - 1];
        }
    }
    chosen.reverse();
    chosen
}

/// Summed priority value of a selection.
pub fn total_priority_value(selection: &[&Incident]) -> u32 {
    selection.iter().map(|i| i.priority.value()).sum()
}

/// Summed duration of a selection (minutes).
pub fn total_duration_minutes(selection: &[&Incident]) -> u32 {
    selection.iter().map(|i| i.estimated_duration).sum()
}
