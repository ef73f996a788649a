//! Resource allocation.
//!
//! [`ResourceAllocator`] serves an ordered list of incidents from a unit
//! inventory, always committing the nearest available unit. The order of
//! the list matters: units taken for earlier incidents stay taken.
//!
//! # Reference
//! Toregas et al. (1971), "The Location of Emergency Service Facilities"

mod allocator;

pub use allocator::{AllocationOutcome, AllocationRequest, ResourceAllocator};
pub use crate::models::{AllocationPlan, Assignment, IncidentAllocation};
