use super::prelude::*;
use rand::Rng;
use std::path::PathBuf;

/// Random complete instance with asymmetric costs in `1..=max_cost` and
/// zero diagonal.
pub fn random_matrix(rng: &mut impl Rng, n: NumVertices, max_cost: Cost) -> CostMatrix {
    let mut matrix = CostMatrix::new(n);

    for u in matrix.vertices() {
        for v in matrix.vertices() {
            if u != v {
                matrix.set_cost(u, v, rng.gen_range(1..=max_cost));
            }
        }
    }

    matrix
}

/// As [`random_matrix`], but with `cost(u, v) == cost(v, u)`.
pub fn random_symmetric_matrix(rng: &mut impl Rng, n: NumVertices, max_cost: Cost) -> CostMatrix {
    let mut matrix = CostMatrix::new(n);

    for u in matrix.vertices() {
        for v in 0..u {
            let cost = rng.gen_range(1..=max_cost);
            matrix.set_cost(u, v, cost);
            matrix.set_cost(v, u, cost);
        }
    }

    matrix
}

/// The checked-in tiny instances in lexicographic order.
pub fn tiny_instance_files() -> Vec<PathBuf> {
    let mut files: Vec<_> = glob::glob("instances/tiny/*.tsp")
        .expect("Failed to glob")
        .map(|r| r.expect("Failed to access globbed path"))
        .collect();

    files.sort();
    files
}
