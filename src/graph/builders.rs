//! Ready-made city layouts.
//!
//! - [`sample_city`]: the five-location reference map.
//! - [`grid_city`]: a rows × cols street grid with seeded random travel times.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::WeightedGraph;

/// Shortest and longest random street segment (minutes).
const GRID_MIN_MINUTES: u32 = 5;
const GRID_MAX_MINUTES: u32 = 60;

/// The reference map: HQ plus locations A–D.
///
/// | Edge | Minutes |
/// |------|---------|
/// | HQ–A | 5 |
/// | HQ–B | 10 |
/// | A–B | 3 |
/// | A–C | 8 |
/// | B–C | 6 |
/// | B–D | 7 |
/// | C–D | 4 |
pub fn sample_city() -> WeightedGraph {
    let mut city = WeightedGraph::new();
    for name in ["HQ", "A", "B", "C", "D"] {
        city.add_vertex(name);
    }
    city.add_edge("HQ", "A", 5.0);
    city.add_edge("HQ", "B", 10.0);
    city.add_edge("A", "B", 3.0);
    city.add_edge("A", "C", 8.0);
    city.add_edge("B", "C", 6.0);
    city.add_edge("B", "D", 7.0);
    city.add_edge("C", "D", 4.0);
    city
}

/// Label of the `idx`-th grid cell: HQ, A, B, …, Z, then N27, N28, ….
pub fn grid_label(idx: usize) -> String {
    match idx {
        0 => "HQ".to_string(),
        1..=26 => char::from(b'A' + (idx - 1) as u8).to_string(),
        _ => format!("N{idx}"),
    }
}

/// A rows × cols 4-neighbour street grid.
///
/// Cells are labelled row-major with [`grid_label`]. Every street gets an
/// integer travel time drawn uniformly from 5..=60 minutes; the same seed
/// always yields the same city.
pub fn grid_city(rows: usize, cols: usize, seed: u64) -> WeightedGraph {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut city = WeightedGraph::new();

    for idx in 0..rows * cols {
        city.add_vertex(grid_label(idx));
    }

    for r in 0..rows {
        for c in 0..cols {
            let here = grid_label(r * cols + c);
            if c + 1 < cols {
                let minutes = rng.random_range(GRID_MIN_MINUTES..=GRID_MAX_MINUTES);
                city.add_edge(here.clone(), grid_label(r * cols + c + 1), minutes as f64);
            }
            if r + 1 < rows {
                let minutes = rng.random_range(GRID_MIN_MINUTES..=GRID_MAX_MINUTES);
                city.add_edge(here, grid_label((r + 1) * cols + c), minutes as f64);
            }
        }
    }
    city
}
