//! Emergency dispatch engine.
//!
//! Routes units over a city road graph, ranks and selects incidents, and
//! assigns the nearest available units to each incident in priority order.
//!
//! # Modules
//!
//! - **`graph`**: City graph, Dijkstra routes, Prim/Kruskal spanning trees
//! - **`models`**: Domain types: `Incident`, `Priority`, `ResourceInventory`,
//!   `AllocationPlan`, `Assignment`
//! - **`scheduler`**: Sort strategies, activity selection, knapsack selection,
//!   the `IncidentScheduler` board and its report
//! - **`allocation`**: Greedy nearest-unit `ResourceAllocator`
//! - **`config`**: `DispatchConfig` (strategies, time budget, default durations)
//! - **`validation`**: Input integrity checks (duplicate IDs, unknown locations)
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use u_dispatch::allocation::ResourceAllocator;
//! use u_dispatch::graph::sample_city;
//! use u_dispatch::models::{Incident, IncidentType, Priority, ResourceInventory, AMBULANCE, FIRE_TRUCK};
//! use u_dispatch::scheduler::IncidentScheduler;
//!
//! let at = |h| NaiveDate::from_ymd_opt(2025, 5, 4).unwrap().and_hms_opt(h, 0, 0).unwrap();
//! let city = sample_city();
//!
//! let mut board = IncidentScheduler::new();
//! board.add(Incident::new("INC-1", "B", at(8), IncidentType::Fire, Priority::Critical)
//!     .with_need(FIRE_TRUCK, 1));
//! board.add(Incident::new("INC-2", "D", at(9), IncidentType::Medical, Priority::High)
//!     .with_need(AMBULANCE, 1));
//!
//! let fleet = ResourceInventory::new()
//!     .with_units("HQ", FIRE_TRUCK, 1)
//!     .with_units("C", AMBULANCE, 1);
//!
//! let outcome = ResourceAllocator::new(&city).allocate_pending(fleet, &board);
//! assert!(outcome.plan.is_complete());
//! assert_eq!(outcome.plan.total_response_minutes(), 8.0 + 4.0);
//! ```
//!
//! # References
//!
//! - Cormen et al. (2009), "Introduction to Algorithms"
//! - Kellerer, Pferschy & Pisinger (2004), "Knapsack Problems"

pub mod allocation;
pub mod config;
pub mod error;
pub mod graph;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::{DispatchError, Result};
