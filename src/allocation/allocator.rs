//! Greedy nearest-unit allocator.
//!
//! # Algorithm
//!
//! 1. Take requests in the given order (typically the pending view).
//! 2. Run Dijkstra once from the incident location.
//! 3. For each needed unit, one at a time: scan graph vertices in
//!    insertion order, keep the first strictly cheapest location that
//!    still holds a unit of that type, and take one unit from it.
//! 4. If no reachable location holds one, record an unfulfilled
//!    assignment and move on.
//!
//! Travel times are symmetric, so distances from the incident equal
//! distances to it. Units taken for an earlier request are never handed
//! back to a later one within the same pass.
//!
//! # Complexity
//! O(R * ((V + E) log V + U * V)) for R requests and U units per request.

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::graph::{dijkstra, ShortestPaths, WeightedGraph};
use crate::models::{
    AllocationPlan, Assignment, Incident, IncidentAllocation, ResourceInventory, ResourceNeed,
};
use crate::scheduler::IncidentScheduler;

/// What one incident needs, and where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRequest {
    /// Incident identifier.
    pub incident_id: String,
    /// Incident location (graph vertex).
    pub location: String,
    /// Needs in dispatch order.
    pub needs: Vec<ResourceNeed>,
}

impl AllocationRequest {
    /// Creates a request with no needs.
    pub fn new(incident_id: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            incident_id: incident_id.into(),
            location: location.into(),
            needs: Vec::new(),
        }
    }

    /// Adds `quantity` units of `resource_type`.
    pub fn with_need(mut self, resource_type: impl Into<String>, quantity: u32) -> Self {
        self.needs.push(ResourceNeed {
            resource_type: resource_type.into(),
            quantity,
        });
        self
    }
}

impl From<&Incident> for AllocationRequest {
    fn from(incident: &Incident) -> Self {
        Self {
            incident_id: incident.id.clone(),
            location: incident.location.clone(),
            needs: incident.required_resources.clone(),
        }
    }
}

/// Plan plus the inventory left after the pass.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationOutcome {
    /// Assignments per incident.
    pub plan: AllocationPlan,
    /// Remaining units.
    pub inventory: ResourceInventory,
}

/// Assigns the nearest available units to incidents.
///
/// # Example
///
/// ```
/// use u_dispatch::allocation::{AllocationRequest, ResourceAllocator};
/// use u_dispatch::graph::sample_city;
/// use u_dispatch::models::{ResourceInventory, FIRE_TRUCK};
///
/// let city = sample_city();
/// let fleet = ResourceInventory::new()
///     .with_units("HQ", FIRE_TRUCK, 1)
///     .with_units("C", FIRE_TRUCK, 1);
///
/// let requests = [AllocationRequest::new("INC-001", "D").with_need(FIRE_TRUCK, 2)];
/// let outcome = ResourceAllocator::new(&city).allocate(fleet, &requests);
///
/// let sources: Vec<_> = outcome.plan.assignments().map(|a| a.source.as_deref()).collect();
/// assert_eq!(sources, vec![Some("C"), Some("HQ")]);
/// assert_eq!(outcome.inventory.total(FIRE_TRUCK), 0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ResourceAllocator<'g> {
    graph: &'g WeightedGraph,
}

impl<'g> ResourceAllocator<'g> {
    /// Creates an allocator over a city graph.
    pub fn new(graph: &'g WeightedGraph) -> Self {
        Self { graph }
    }

    /// The city graph.
    pub fn graph(&self) -> &'g WeightedGraph {
        self.graph
    }

    /// Serves `requests` in order against `inventory`.
    pub fn allocate(
        &self,
        mut inventory: ResourceInventory,
        requests: &[AllocationRequest],
    ) -> AllocationOutcome {
        let mut plan = AllocationPlan::new();

        for request in requests {
            let tree = dijkstra(self.graph, &request.location);
            let mut assignments = Vec::new();

            for need in &request.needs {
                for _ in 0..need.quantity {
                    assignments.push(self.dispatch_one(&tree, &mut inventory, request, need));
                }
            }

            plan.push(IncidentAllocation {
                incident_id: request.incident_id.clone(),
                location: request.location.clone(),
                assignments,
            });
        }

        info!(
            incidents = requests.len(),
            dispatched = plan.dispatched_count(),
            unfulfilled = plan.unfulfilled_count(),
            "allocation pass complete"
        );

        AllocationOutcome { plan, inventory }
    }

    /// Serves incidents in the given order.
    pub fn allocate_incidents<I: Borrow<Incident>>(
        &self,
        inventory: ResourceInventory,
        incidents: &[I],
    ) -> AllocationOutcome {
        let requests: Vec<AllocationRequest> = incidents
            .iter()
            .map(|i| AllocationRequest::from(i.borrow()))
            .collect();
        self.allocate(inventory, &requests)
    }

    /// Serves a board's pending incidents, most urgent first.
    pub fn allocate_pending(
        &self,
        inventory: ResourceInventory,
        scheduler: &IncidentScheduler,
    ) -> AllocationOutcome {
        self.allocate_incidents(inventory, &scheduler.pending())
    }

    /// Nearest location holding a unit of `resource_type`, and its distance.
    ///
    /// Scans in vertex order; only a strictly smaller distance replaces the
    /// current best, so the first of several equidistant locations wins.
    pub fn nearest_source(
        &self,
        tree: &ShortestPaths<'_>,
        inventory: &ResourceInventory,
        resource_type: &str,
    ) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (idx, location) in self.graph.all_vertices().iter().enumerate() {
            if !inventory.has_available(location, resource_type) {
                continue;
            }
            let distance = tree.distance_at(idx);
            if distance < best.map_or(f64::INFINITY, |(_, d)| d) {
                best = Some((idx, distance));
            }
        }
        best
    }

    fn dispatch_one(
        &self,
        tree: &ShortestPaths<'_>,
        inventory: &mut ResourceInventory,
        request: &AllocationRequest,
        need: &ResourceNeed,
    ) -> Assignment {
        let resource_type = need.resource_type.as_str();
        let Some((idx, distance)) = self.nearest_source(tree, inventory, resource_type) else {
            debug!(
                incident = %request.incident_id,
                resource_type,
                "no reachable unit available"
            );
            return Assignment::unfulfilled(resource_type);
        };

        let source = self.graph.all_vertices()[idx].as_str();
        if let Err(err) = inventory.take(source, resource_type) {
            debug!(incident = %request.incident_id, %err, "unit vanished before commit");
            return Assignment::unfulfilled(resource_type);
        }

        debug!(
            incident = %request.incident_id,
            resource_type,
            source,
            travel = distance,
            "unit dispatched"
        );
        Assignment::dispatched(resource_type, source, distance, tree.walk_to_source(idx))
    }
}
