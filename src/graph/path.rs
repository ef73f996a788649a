//! Single-source shortest paths (Dijkstra).
//!
//! # Algorithm
//! Priority-queue relaxation with lazy deletion. A vertex is settled the
//! first time it is popped; later, stale queue entries are skipped.
//!
//! # Tie-breaking
//! Queue entries with equal distance pop in the order they were pushed,
//! and relaxation only replaces a predecessor on a strictly shorter
//! distance. The first-discovered route therefore wins every tie.
//!
//! # Complexity
//! O((V + E) log V).
//!
//! # Reference
//! Dijkstra (1959), "A note on two problems in connexion with graphs";
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 24.3

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::WeightedGraph;

/// An ordered list of locations and its total travel time.
///
/// Unreachable destinations produce an empty path with infinite cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Locations from start to end, inclusive.
    pub path: Vec<String>,
    /// Total travel time (minutes).
    pub cost: f64,
}

impl Route {
    /// The "no route" value.
    pub fn unreachable() -> Self {
        Self {
            path: Vec::new(),
            cost: f64::INFINITY,
        }
    }

    /// Whether a route exists.
    pub fn is_reachable(&self) -> bool {
        self.cost.is_finite()
    }

    /// Number of edges travelled.
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Shortest-path tree rooted at one source.
#[derive(Debug, Clone)]
pub struct ShortestPaths<'g> {
    graph: &'g WeightedGraph,
    source: Option<usize>,
    distances: Vec<f64>,
    predecessors: Vec<Option<usize>>,
}

#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    cost: f64,
    seq: u64,
    vertex: usize,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    // BinaryHeap is a max-heap: reverse both keys so the cheapest,
    // earliest-pushed entry surfaces first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Runs Dijkstra from `source` over the whole graph.
///
/// An unknown source yields a tree where every vertex is unreachable.
pub fn dijkstra<'g>(graph: &'g WeightedGraph, source: &str) -> ShortestPaths<'g> {
    let n = graph.vertex_count();
    let mut distances = vec![f64::INFINITY; n];
    let mut predecessors = vec![None; n];

    let Some(start) = graph.index_of(source) else {
        warn!(source, "shortest-path source is not a vertex of the graph");
        return ShortestPaths {
            graph,
            source: None,
            distances,
            predecessors,
        };
    };

    let mut visited = vec![false; n];
    let mut heap = BinaryHeap::new();
    let mut seq: u64 = 0;

    distances[start] = 0.0;
    heap.push(QueueEntry {
        cost: 0.0,
        seq,
        vertex: start,
    });

    while let Some(QueueEntry { cost, vertex, .. }) = heap.pop() {
        if visited[vertex] {
            continue;
        }
        visited[vertex] = true;

        for &(next, weight) in graph.arcs(vertex) {
            let candidate = cost + weight;
            if candidate < distances[next] {
                distances[next] = candidate;
                predecessors[next] = Some(vertex);
                seq += 1;
                heap.push(QueueEntry {
                    cost: candidate,
                    seq,
                    vertex: next,
                });
            }
        }
    }

    ShortestPaths {
        graph,
        source: Some(start),
        distances,
        predecessors,
    }
}

impl<'g> ShortestPaths<'g> {
    /// The source location, if it was a vertex of the graph.
    pub fn source(&self) -> Option<&str> {
        self.source.map(|idx| self.graph.name(idx))
    }

    /// Shortest travel time to `vertex` (infinite if unreachable or unknown).
    pub fn distance_to(&self, vertex: &str) -> f64 {
        self.graph
            .index_of(vertex)
            .map_or(f64::INFINITY, |idx| self.distances[idx])
    }

    /// Whether `vertex` can be reached from the source.
    pub fn is_reachable(&self, vertex: &str) -> bool {
        self.distance_to(vertex).is_finite()
    }

    /// Predecessor of `vertex` in the shortest-path tree.
    pub fn predecessor(&self, vertex: &str) -> Option<&str> {
        let idx = self.graph.index_of(vertex)?;
        self.predecessors[idx].map(|p| self.graph.name(p))
    }

    /// Route from the source to `end`, rebuilt from predecessor links.
    pub fn route_to(&self, end: &str) -> Route {
        match self.graph.index_of(end) {
            Some(idx) if self.distances[idx].is_finite() => {
                let mut path = self.walk_to_source(idx);
                path.reverse();
                Route {
                    path,
                    cost: self.distances[idx],
                }
            }
            _ => Route::unreachable(),
        }
    }

    /// Distance by dense index.
    pub(crate) fn distance_at(&self, idx: usize) -> f64 {
        self.distances[idx]
    }

    /// Locations from `idx` back to the source, following predecessors.
    ///
    /// On an undirected graph this is also a shortest route *towards* the
    /// source, which the allocator uses to route units to an incident.
    pub(crate) fn walk_to_source(&self, idx: usize) -> Vec<String> {
        let mut path = Vec::new();
        let mut current = Some(idx);
        while let Some(v) = current {
            path.push(self.graph.name(v).to_string());
            current = self.predecessors[v];
        }
        path
    }
}

/// Shortest route between two locations.
///
/// # Example
///
/// ```
/// use u_dispatch::graph::{sample_city, shortest_path};
///
/// let city = sample_city();
/// let route = shortest_path(&city, "HQ", "D");
/// assert_eq!(route.path, vec!["HQ", "A", "B", "D"]);
/// assert_eq!(route.cost, 15.0);
/// ```
pub fn shortest_path(graph: &WeightedGraph, start: &str, end: &str) -> Route {
    dijkstra(graph, start).route_to(end)
}

/// Routes from `start` to every other location, in vertex order.
pub fn routes_from(graph: &WeightedGraph, start: &str) -> Vec<(String, Route)> {
    let tree = dijkstra(graph, start);
    graph
        .all_vertices()
        .iter()
        .filter(|v| v.as_str() != start)
        .map(|v| (v.clone(), tree.route_to(v)))
        .collect()
}
