//! City graph and graph algorithms.
//!
//! - [`WeightedGraph`]: undirected travel-time graph over named locations
//! - [`dijkstra`] / [`shortest_path`]: fastest response routes
//! - [`prim`] / [`kruskal`]: minimum spanning trees for infrastructure plans
//! - [`sample_city`] / [`grid_city`]: ready-made layouts
//!
//! Solvers only read the graph; it is mutated solely through
//! [`WeightedGraph::add_vertex`] and [`WeightedGraph::add_edge`].

mod builders;
mod city;
mod mst;
mod path;

pub use builders::{grid_city, grid_label, sample_city};
pub use city::WeightedGraph;
pub use mst::{
    compare_strategies, kruskal, plan_infrastructure, prim, MstComparison, MstEdge, MstStrategy,
    SpanningTree,
};
pub use path::{dijkstra, routes_from, shortest_path, Route, ShortestPaths};
