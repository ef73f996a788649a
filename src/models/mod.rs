//! Dispatch domain models.
//!
//! Provides the core data types for incidents, unit inventories, and
//! allocation results.
//!
//! # Domain Mappings
//!
//! | u-dispatch | Fire Service | EMS | Police |
//! |------------|--------------|-----|--------|
//! | Incident | Fire call | Patient call | Report |
//! | ResourceNeed | Engines required | Ambulances required | Patrols required |
//! | ResourceInventory | Station apparatus | Base fleet | Precinct cars |
//! | AllocationPlan | Run card | Dispatch sheet | Assignment board |

mod incident;
mod plan;
mod resource;
mod window;

pub use incident::{
    Incident, IncidentStatus, IncidentType, Priority, PriorityDurations, ResourceNeed,
};
pub use plan::{AllocationPlan, Assignment, IncidentAllocation};
pub use resource::{ResourceInventory, AMBULANCE, FIRE_TRUCK, POLICE_CAR, STANDARD_UNITS};
pub use window::ResponseWindow;
