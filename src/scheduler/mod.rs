//! Incident ordering and selection.
//!
//! Ranks and selects incidents ahead of an allocation pass.
//!
//! # Sorting
//!
//! [`SortStrategy`] runs merge, quick, or heap sort over any key. Only
//! merge sort is stable.
//!
//! # Selection
//!
//! - [`activity_selection`]: most non-overlapping response windows
//! - [`knapsack_selection`]: highest total priority within a time budget
//!
//! [`IncidentScheduler`] holds the incident list and exposes both, plus the
//! pending view used as allocation input. [`IncidentReport`] summarizes it.
//!
//! # References
//!
//! - Cormen et al. (2009), "Introduction to Algorithms", Ch. 2, 6, 7, 16
//! - Kellerer, Pferschy & Pisinger (2004), "Knapsack Problems"

mod planner;
mod report;
mod selection;
mod sorting;

pub use planner::{IncidentScheduler, ResponseSchedule};
pub use report::IncidentReport;
pub use selection::{
    activity_selection, activity_selection_indices, knapsack_indices, knapsack_selection,
    total_duration_minutes, total_priority_value,
};
pub use sorting::SortStrategy;
