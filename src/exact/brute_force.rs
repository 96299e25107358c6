use itertools::Itertools;

use crate::graph::*;
use crate::utils::Tour;

/// Exhaustive reference solver: tries every permutation of the non-start
/// vertices. Factorial time, only suitable for very small instances and
/// for cross-checking the dynamic program.
pub fn brute_force_solver<G: GraphOrder + EdgeCosts>(graph: &G) -> Option<Tour> {
    let n = graph.number_of_vertices();
    if n == 0 {
        return Some(Tour::new(Vec::new(), 0));
    }

    let mut best: Option<(Cost, Vec<Vertex>)> = None;

    for order in (1..n).permutations(n as usize - 1) {
        let mut cost: Cost = 0;
        let mut prev = START_VERTEX;
        for &v in &order {
            cost = cost.saturating_add(graph.cost(prev, v));
            prev = v;
        }
        cost = cost.saturating_add(graph.cost(prev, START_VERTEX));

        if best.as_ref().map_or(true, |(c, _)| cost < *c) {
            best = Some((cost, order));
        }
    }

    let (cost, order) = best.unwrap();
    if cost == INFINITE_COST {
        return None;
    }

    let mut vertices = Vec::with_capacity(n as usize + 1);
    vertices.push(START_VERTEX);
    vertices.extend(order);
    vertices.push(START_VERTEX);

    Some(Tour::new(vertices, cost))
}
