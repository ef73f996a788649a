//! Minimum spanning trees for infrastructure planning.
//!
//! Two interchangeable builders, selected through [`MstStrategy`]:
//!
//! - **Prim**: grows one tree from the first-listed location using a
//!   frontier heap of edges leaving the tree. On a disconnected graph the
//!   result covers only the start's component.
//! - **Kruskal**: scans every undirected edge once in ascending weight
//!   order and keeps those joining two different components (union-find
//!   with path compression and union by rank). On a disconnected graph
//!   the result is a spanning forest.
//!
//! On a connected graph both totals are equal. The edge sets may differ
//! when several minimum trees exist.
//!
//! # Reference
//! Prim (1957); Kruskal (1956);
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 23

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::WeightedGraph;
use crate::error::{DispatchError, Result};

/// One edge of a spanning tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MstEdge {
    /// Endpoint already in the tree when the edge was chosen (Prim),
    /// or the lower-indexed endpoint (Kruskal).
    pub source: String,
    /// The other endpoint.
    pub destination: String,
    /// Travel time (minutes).
    pub weight: f64,
}

/// A spanning tree (or forest) and its total weight.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpanningTree {
    /// Edges in the order they were added.
    pub edges: Vec<MstEdge>,
    /// Sum of edge weights (minutes).
    pub total_weight: f64,
}

impl SpanningTree {
    fn push(&mut self, source: &str, destination: &str, weight: f64) {
        self.edges.push(MstEdge {
            source: source.to_string(),
            destination: destination.to_string(),
            weight,
        });
        self.total_weight += weight;
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether the edges connect every location of `graph`.
    pub fn spans(&self, graph: &WeightedGraph) -> bool {
        graph.vertex_count() == 0 || self.edges.len() + 1 == graph.vertex_count()
    }

    /// Sorted plain-text listing of the plan.
    pub fn render(&self) -> String {
        let mut edges: Vec<&MstEdge> = self.edges.iter().collect();
        edges.sort_by(|a, b| {
            a.source
                .cmp(&b.source)
                .then_with(|| a.destination.cmp(&b.destination))
                .then_with(|| a.weight.total_cmp(&b.weight))
        });

        let mut out = String::from("Minimum Spanning Tree (Infrastructure Plan):\n");
        out.push_str(&"=".repeat(50));
        out.push('\n');
        for e in edges {
            out.push_str(&format!(
                "{} -- {} mins --> {}\n",
                e.source, e.weight, e.destination
            ));
        }
        out
    }
}

/// Spanning-tree algorithm selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MstStrategy {
    /// Prim's frontier-growth algorithm.
    #[default]
    Prim,
    /// Kruskal's sorted-edge algorithm.
    Kruskal,
}

impl MstStrategy {
    /// Strategy name as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            MstStrategy::Prim => "prim",
            MstStrategy::Kruskal => "kruskal",
        }
    }

    /// Builds the tree with this strategy.
    pub fn build(&self, graph: &WeightedGraph) -> SpanningTree {
        match self {
            MstStrategy::Prim => prim(graph),
            MstStrategy::Kruskal => kruskal(graph),
        }
    }
}

impl FromStr for MstStrategy {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prim" => Ok(MstStrategy::Prim),
            "kruskal" => Ok(MstStrategy::Kruskal),
            _ => Err(DispatchError::UnknownMstStrategy(s.to_string())),
        }
    }
}

impl TryFrom<String> for MstStrategy {
    type Error = DispatchError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<MstStrategy> for String {
    fn from(value: MstStrategy) -> Self {
        value.name().to_string()
    }
}

impl fmt::Display for MstStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy)]
struct FrontierEdge {
    weight: f64,
    seq: u64,
    from: usize,
    to: usize,
}

impl PartialEq for FrontierEdge {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEdge {}

impl Ord for FrontierEdge {
    // Min-heap on (weight, push order).
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEdge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Prim's algorithm from the first-listed location.
pub fn prim(graph: &WeightedGraph) -> SpanningTree {
    let mut tree = SpanningTree::default();
    let n = graph.vertex_count();
    if n == 0 {
        return tree;
    }

    let mut in_tree = vec![false; n];
    let mut covered = 1;
    let mut frontier = BinaryHeap::new();
    let mut seq: u64 = 0;

    in_tree[0] = true;
    for &(to, weight) in graph.arcs(0) {
        frontier.push(FrontierEdge {
            weight,
            seq,
            from: 0,
            to,
        });
        seq += 1;
    }

    while covered < n {
        let Some(edge) = frontier.pop() else {
            break;
        };
        if in_tree[edge.to] {
            continue;
        }
        in_tree[edge.to] = true;
        covered += 1;
        tree.push(graph.name(edge.from), graph.name(edge.to), edge.weight);

        for &(to, weight) in graph.arcs(edge.to) {
            if !in_tree[to] {
                frontier.push(FrontierEdge {
                    weight,
                    seq,
                    from: edge.to,
                    to,
                });
                seq += 1;
            }
        }
    }

    debug!(
        edges = tree.edge_count(),
        total = tree.total_weight,
        "prim spanning tree built"
    );
    tree
}

/// Disjoint-set forest over dense vertex ids.
#[derive(Debug, Clone)]
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u32>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Path compression.
        let mut cur = x;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    /// Merges the sets of `a` and `b`. Returns `false` if already joined.
    fn union(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            Ordering::Less => self.parent[ra] = rb,
            Ordering::Greater => self.parent[rb] = ra,
            Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        true
    }
}

/// Kruskal's algorithm over every undirected edge.
///
/// Each edge is taken once, from the lower dense index to the higher.
/// Vertex identity is the exact location string, so two spellings of the
/// same place are two different vertices.
pub fn kruskal(graph: &WeightedGraph) -> SpanningTree {
    let mut edges = graph.undirected_edges();
    edges.sort_by(|a, b| a.2.total_cmp(&b.2));

    let mut sets = UnionFind::new(graph.vertex_count());
    let mut tree = SpanningTree::default();
    for (u, v, weight) in edges {
        if sets.union(u, v) {
            tree.push(graph.name(u), graph.name(v), weight);
        }
    }

    debug!(
        edges = tree.edge_count(),
        total = tree.total_weight,
        "kruskal spanning forest built"
    );
    tree
}

/// Parses an algorithm name and builds the tree.
///
/// # Example
///
/// ```
/// use u_dispatch::graph::{plan_infrastructure, sample_city};
///
/// let city = sample_city();
/// let plan = plan_infrastructure(&city, "Kruskal").unwrap();
/// assert_eq!(plan.total_weight, 18.0);
/// assert!(plan_infrastructure(&city, "boruvka").is_err());
/// ```
pub fn plan_infrastructure(graph: &WeightedGraph, algorithm: &str) -> Result<SpanningTree> {
    let strategy: MstStrategy = algorithm.parse()?;
    Ok(strategy.build(graph))
}

/// Both spanning trees of the same graph, side by side.
#[derive(Debug, Clone)]
pub struct MstComparison {
    /// Prim's result.
    pub prim: SpanningTree,
    /// Kruskal's result.
    pub kruskal: SpanningTree,
}

impl MstComparison {
    /// Whether both algorithms reached the same total weight.
    pub fn costs_agree(&self) -> bool {
        (self.prim.total_weight - self.kruskal.total_weight).abs() < 1e-9
    }
}

/// Runs Prim and Kruskal on the same graph.
pub fn compare_strategies(graph: &WeightedGraph) -> MstComparison {
    MstComparison {
        prim: prim(graph),
        kruskal: kruskal(graph),
    }
}
