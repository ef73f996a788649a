//! Weighted city graph.
//!
//! Undirected adjacency model over named locations. Edge weights are
//! travel times in minutes and are always stored symmetrically.
//!
//! # Ordering
//! Vertices keep insertion order, and each adjacency list keeps the
//! order in which its neighbours were first linked. Solvers iterate in
//! these orders, which makes their tie-breaking reproducible.

use std::collections::HashMap;
use std::fmt;

use tracing::warn;

/// Undirected weighted graph over named locations.
///
/// # Example
///
/// ```
/// use u_dispatch::graph::WeightedGraph;
///
/// let mut city = WeightedGraph::new();
/// city.add_edge("HQ", "A", 5.0);
/// city.add_edge("A", "B", 3.0);
///
/// assert_eq!(city.all_vertices(), &["HQ", "A", "B"]);
/// assert_eq!(city.edge_weight("B", "A"), Some(3.0));
/// assert!(city.neighbors("Z").is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct WeightedGraph {
    vertices: Vec<String>,
    index: HashMap<String, usize>,
    adjacency: Vec<Vec<(usize, f64)>>,
}

impl WeightedGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from `(location, location, minutes)` triples.
    pub fn from_edges<I, S>(edges: I) -> Self
    where
        I: IntoIterator<Item = (S, S, f64)>,
        S: Into<String>,
    {
        let mut graph = Self::new();
        for (a, b, weight) in edges {
            graph.add_edge(a, b, weight);
        }
        graph
    }

    /// Inserts a location. Idempotent; returns the vertex's dense index.
    pub fn add_vertex(&mut self, name: impl Into<String>) -> usize {
        let name = name.into();
        if let Some(&idx) = self.index.get(&name) {
            return idx;
        }
        let idx = self.vertices.len();
        self.index.insert(name.clone(), idx);
        self.vertices.push(name);
        self.adjacency.push(Vec::new());
        idx
    }

    /// Links two locations with a travel time, creating missing endpoints.
    ///
    /// Sets `w(a, b) = w(b, a) = weight`. Calling it again for the same
    /// pair overwrites the weight. Negative weights are accepted but
    /// solvers give no guarantees for them.
    pub fn add_edge(&mut self, a: impl Into<String>, b: impl Into<String>, weight: f64) {
        let u = self.add_vertex(a);
        let v = self.add_vertex(b);
        if weight < 0.0 {
            warn!(
                from = %self.vertices[u],
                to = %self.vertices[v],
                weight,
                "negative edge weight; shortest paths are undefined"
            );
        }
        set_arc(&mut self.adjacency[u], v, weight);
        if u != v {
            set_arc(&mut self.adjacency[v], u, weight);
        }
    }

    /// Adjacent locations with their travel times.
    ///
    /// Unknown locations degrade to an empty list.
    pub fn neighbors(&self, vertex: &str) -> Vec<(&str, f64)> {
        match self.index_of(vertex) {
            Some(idx) => self.adjacency[idx]
                .iter()
                .map(|&(n, w)| (self.vertices[n].as_str(), w))
                .collect(),
            None => Vec::new(),
        }
    }

    /// All locations in insertion order.
    pub fn all_vertices(&self) -> &[String] {
        &self.vertices
    }

    /// Whether the location is part of the graph.
    pub fn contains(&self, vertex: &str) -> bool {
        self.index.contains_key(vertex)
    }

    /// Travel time of the direct edge between two locations, if any.
    pub fn edge_weight(&self, a: &str, b: &str) -> Option<f64> {
        let u = self.index_of(a)?;
        let v = self.index_of(b)?;
        self.adjacency[u]
            .iter()
            .find(|&&(n, _)| n == v)
            .map(|&(_, w)| w)
    }

    /// Number of locations.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of undirected edges (self-loops excluded).
    pub fn edge_count(&self) -> usize {
        self.undirected_edges().len()
    }

    /// Every undirected edge once, as `(u, v, weight)` with `u < v` by index.
    pub fn edges(&self) -> Vec<(&str, &str, f64)> {
        self.undirected_edges()
            .into_iter()
            .map(|(u, v, w)| (self.vertices[u].as_str(), self.vertices[v].as_str(), w))
            .collect()
    }

    pub(crate) fn index_of(&self, vertex: &str) -> Option<usize> {
        self.index.get(vertex).copied()
    }

    pub(crate) fn name(&self, idx: usize) -> &str {
        &self.vertices[idx]
    }

    pub(crate) fn arcs(&self, idx: usize) -> &[(usize, f64)] {
        &self.adjacency[idx]
    }

    /// Canonical edge list keyed by dense index: each pair appears once,
    /// from the lower index to the higher one.
    pub(crate) fn undirected_edges(&self) -> Vec<(usize, usize, f64)> {
        let mut edges = Vec::new();
        for (u, arcs) in self.adjacency.iter().enumerate() {
            for &(v, w) in arcs {
                if u < v {
                    edges.push((u, v, w));
                }
            }
        }
        edges
    }
}

fn set_arc(arcs: &mut Vec<(usize, f64)>, to: usize, weight: f64) {
    match arcs.iter_mut().find(|(n, _)| *n == to) {
        Some(arc) => arc.1 = weight,
        None => arcs.push((to, weight)),
    }
}

impl fmt::Display for WeightedGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "City Emergency Graph:")?;
        for (idx, name) in self.vertices.iter().enumerate() {
            let links: Vec<String> = self.adjacency[idx]
                .iter()
                .map(|&(n, w)| format!("{}: {}", self.vertices[n], w))
                .collect();
            writeln!(f, "{name} -> {{{}}}", links.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_vertex_idempotent() {
        let mut g = WeightedGraph::new();
        let a = g.add_vertex("A");
        let again = g.add_vertex("A");
        assert_eq!(a, again);
        assert_eq!(g.vertex_count(), 1);
    }

    #[test]
    fn test_add_edge_creates_endpoints_symmetrically() {
        let mut g = WeightedGraph::new();
        g.add_edge("HQ", "A", 5.0);

        assert_eq!(g.all_vertices(), &["HQ", "A"]);
        assert_eq!(g.edge_weight("HQ", "A"), Some(5.0));
        assert_eq!(g.edge_weight("A", "HQ"), Some(5.0));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_last_write_wins() {
        let mut g = WeightedGraph::new();
        g.add_edge("A", "B", 4.0);
        g.add_edge("B", "A", 9.0);

        assert_eq!(g.edge_weight("A", "B"), Some(9.0));
        assert_eq!(g.neighbors("A"), vec![("B", 9.0)]);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_neighbors_keep_link_order() {
        let g = WeightedGraph::from_edges([("A", "C", 1.0), ("A", "B", 2.0), ("A", "D", 3.0)]);
        let names: Vec<&str> = g.neighbors("A").iter().map(|&(n, _)| n).collect();
        assert_eq!(names, vec!["C", "B", "D"]);
    }

    #[test]
    fn test_unknown_vertex_degrades() {
        let g = WeightedGraph::from_edges([("A", "B", 1.0)]);
        assert!(g.neighbors("nowhere").is_empty());
        assert!(g.edge_weight("A", "nowhere").is_none());
        assert!(!g.contains("nowhere"));
    }

    #[test]
    fn test_edges_listed_once() {
        let g = WeightedGraph::from_edges([("A", "B", 1.0), ("B", "C", 2.0), ("C", "A", 3.0)]);
        let edges = g.edges();
        assert_eq!(edges.len(), 3);
        assert!(edges.contains(&("A", "C", 3.0)));
    }

    #[test]
    fn test_self_loop_not_counted_as_edge() {
        let mut g = WeightedGraph::new();
        g.add_edge("A", "A", 2.0);
        assert_eq!(g.neighbors("A"), vec![("A", 2.0)]);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_display() {
        let g = WeightedGraph::from_edges([("HQ", "A", 5.0)]);
        let text = g.to_string();
        assert!(text.contains("HQ -> {A: 5}"));
        assert!(text.contains("A -> {HQ: 5}"));
    }
}
