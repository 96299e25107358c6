use log::debug;
use thiserror::Error;

use crate::graph::*;
use crate::utils::Tour;

/// Exact TSP solver implementing the Held-Karp subset dynamic program.
///
/// The solver snapshots the cost matrix at construction and owns a memo
/// table with one slot per `(vertex, subset-of-vertices-still-to-visit)`
/// pair. `best_completion(v, S)` is the cheapest way to start at `v`,
/// visit every vertex of `S` exactly once and return to
/// [`START_VERTEX`]; each slot records that cost together with the first
/// hop achieving it, so the optimal tour can be replayed from the table
/// without recomputation. A slot is written at most once and never
/// invalidated.
///
/// Memory grows as `n * 2^n` slots, which is the limiting factor long
/// before runtime is.
pub struct HeldKarp {
    number_of_vertices: NumVertices,
    costs: Vec<Cost>,
    memo: Vec<Option<Choice>>,
}

/// Memoized answer for one `(vertex, remaining-set)` state: the best
/// completion cost and the next vertex on a cheapest completion.
#[derive(Copy, Clone, Debug)]
struct Choice {
    cost: Cost,
    next: Vertex,
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("instance has {0} vertices, exceeding the supported maximum of 32")]
    TooManyVertices(NumVertices),
}

impl HeldKarp {
    /// Snapshots `graph` and allocates the memo table. The graph is only
    /// queried here; later changes to it do not affect the solver.
    pub fn new<G: GraphOrder + EdgeCosts>(graph: &G) -> Result<Self, BuildError> {
        let n = graph.number_of_vertices();
        if n > VertexSet::CAPACITY {
            return Err(BuildError::TooManyVertices(n));
        }

        let costs = graph
            .vertices()
            .flat_map(|u| graph.vertices().map(move |v| graph.cost(u, v)))
            .collect();

        Ok(Self {
            number_of_vertices: n,
            costs,
            memo: vec![None; n as usize * VertexSet::number_of_subsets(n)],
        })
    }

    /// Computes a minimum-cost Hamiltonian cycle through all vertices,
    /// starting and ending at [`START_VERTEX`]. Returns `None` if no
    /// finite-cost cycle exists. Calling `solve` again replays the memo
    /// table and yields the identical result.
    pub fn solve(&mut self) -> Option<Tour> {
        let n = self.number_of_vertices;
        if n == 0 {
            return Some(Tour::new(Vec::new(), 0));
        }

        let remaining = VertexSet::full(n).without(START_VERTEX);
        let best = self.best_completion(START_VERTEX, remaining);

        debug!(
            "memoized {} of {} states",
            self.memo.iter().filter(|e| e.is_some()).count(),
            self.memo.len()
        );

        if best == INFINITE_COST {
            return None;
        }

        let vertices = self.reconstruct(remaining)?;
        Some(Tour::new(vertices, best))
    }

    fn cost(&self, u: Vertex, v: Vertex) -> Cost {
        self.costs[u as usize * self.number_of_vertices as usize + v as usize]
    }

    fn slot(&self, v: Vertex, remaining: VertexSet) -> usize {
        debug_assert!(!remaining.contains(START_VERTEX));
        v as usize * VertexSet::number_of_subsets(self.number_of_vertices) + remaining.index()
    }

    /// Minimum cost of starting at `from`, visiting every vertex of
    /// `remaining` exactly once and returning to [`START_VERTEX`].
    /// `remaining` never contains the start vertex.
    fn best_completion(&mut self, from: Vertex, remaining: VertexSet) -> Cost {
        if remaining.is_empty() {
            return self.cost(from, START_VERTEX);
        }

        let slot = self.slot(from, remaining);
        if let Some(choice) = self.memo[slot] {
            return choice.cost;
        }

        let mut best = INFINITE_COST;
        let mut best_next = None;

        for j in remaining.iter() {
            let completion = self.best_completion(j, remaining.without(j));
            let total = self.cost(from, j).saturating_add(completion);

            if total < best {
                best = total;
                best_next = Some(j);
            }
        }

        // a state without a finite completion stays unmemoized
        if let Some(next) = best_next {
            self.memo[slot] = Some(Choice { cost: best, next });
        }

        best
    }

    /// Replays the memoized next-hop choices starting from
    /// [`START_VERTEX`] with `remaining` to visit, closing the cycle at
    /// the end. Purely table-driven; returns `None` if the replay runs
    /// into an unmemoized state, which cannot happen after
    /// [`Self::best_completion`] returned a finite cost for `remaining`.
    fn reconstruct(&self, mut remaining: VertexSet) -> Option<Vec<Vertex>> {
        let mut vertices = Vec::with_capacity(self.number_of_vertices as usize + 1);
        let mut current = START_VERTEX;
        vertices.push(current);

        while !remaining.is_empty() {
            let choice = self.memo[self.slot(current, remaining)];
            debug_assert!(choice.is_some());

            current = choice?.next;
            vertices.push(current);
            remaining = remaining.without(current);
        }

        vertices.push(START_VERTEX);
        Some(vertices)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::exact::brute_force_solver;
    use crate::io::TspRead;
    use crate::testing::{random_matrix, random_symmetric_matrix, tiny_instance_files};

    use itertools::Itertools;
    use rand::SeedableRng;
    use rayon::prelude::*;

    fn solve_matrix(matrix: &CostMatrix) -> Option<Tour> {
        HeldKarp::new(matrix).unwrap().solve()
    }

    #[test]
    fn zero_vertices() {
        let tour = solve_matrix(&CostMatrix::new(0)).unwrap();
        assert_eq!(tour.cost(), 0);
        assert!(tour.vertices().is_empty());
    }

    #[test]
    fn single_vertex() {
        let mut matrix = CostMatrix::new(1);
        matrix.set_cost(0, 0, 3);

        let tour = solve_matrix(&matrix).unwrap();
        assert_eq!(tour.cost(), 3);
        assert_eq!(tour.vertices(), [0, 0]);
    }

    #[test]
    fn two_vertices() {
        let matrix = CostMatrix::test_only_from([[0, 5], [7, 0]]);

        let tour = solve_matrix(&matrix).unwrap();
        assert_eq!(tour.cost(), 12);
        assert_eq!(tour.vertices(), [0, 1, 0]);
    }

    #[test]
    fn four_vertices_known_optimum() {
        let matrix = CostMatrix::test_only_from([
            [0, 10, 15, 20],
            [10, 0, 35, 25],
            [15, 35, 0, 30],
            [20, 25, 30, 0],
        ]);

        let tour = solve_matrix(&matrix).unwrap();
        assert_eq!(tour.cost(), 80);
        assert!(tour.is_valid(&matrix));
    }

    #[test]
    fn infeasible_without_finite_cycle() {
        // every cycle through all three vertices uses one of the two
        // missing edges
        let matrix = CostMatrix::test_only_from([
            [0, 4, 9],
            [3, 0, INFINITE_COST],
            [7, INFINITE_COST, 0],
        ]);

        assert!(solve_matrix(&matrix).is_none());
    }

    #[test]
    fn tiny() {
        let expected = [
            Some(0),
            Some(12),
            Some(80),
            Some(21),
            None,
            Some(30),
            Some(138),
        ];

        let files = tiny_instance_files();
        assert_eq!(files.len(), expected.len());

        for (file, expected) in files.into_iter().zip(expected) {
            let matrix =
                CostMatrix::try_read_tsp_file(&file).expect("Could not parse instance");

            let tour = solve_matrix(&matrix);
            assert_eq!(
                tour.as_ref().map(Tour::cost),
                expected,
                "file: {}",
                file.display()
            );

            if let Some(tour) = tour {
                assert!(tour.is_valid(&matrix), "file: {}", file.display());
            }
        }
    }

    #[test]
    fn solve_twice_is_idempotent() {
        let mut rng = rand_pcg::Pcg64::seed_from_u64(987);
        let matrix = random_matrix(&mut rng, 7, 100);

        let mut solver = HeldKarp::new(&matrix).unwrap();
        let first = solver.solve().unwrap();
        let second = solver.solve().unwrap();

        assert_eq!(first.cost(), second.cost());
        assert_eq!(first.vertices(), second.vertices());
    }

    #[test]
    fn memo_requery_matches_first_computation() {
        let mut rng = rand_pcg::Pcg64::seed_from_u64(31);
        let matrix = random_matrix(&mut rng, 6, 50);
        let mut solver = HeldKarp::new(&matrix).unwrap();

        let remaining = VertexSet::full(6).without(START_VERTEX);
        let first = solver.best_completion(2, remaining.without(2));
        let again = solver.best_completion(2, remaining.without(2));
        assert_eq!(first, again);
    }

    #[test]
    fn sub_states_match_brute_force_permutations() {
        let mut rng = rand_pcg::Pcg64::seed_from_u64(5150);
        let n = 6;
        let matrix = random_matrix(&mut rng, n, 30);
        let mut solver = HeldKarp::new(&matrix).unwrap();

        for from in matrix.vertices() {
            let remaining = VertexSet::full(n).without(START_VERTEX).without(from);

            let by_permutations = remaining
                .iter()
                .permutations(remaining.cardinality() as usize)
                .map(|order| {
                    let mut cost = 0u64;
                    let mut prev = from;
                    for v in order {
                        cost += matrix.cost(prev, v);
                        prev = v;
                    }
                    cost + matrix.cost(prev, START_VERTEX)
                })
                .min()
                .unwrap();

            assert_eq!(solver.best_completion(from, remaining), by_permutations);
        }
    }

    #[test]
    fn matches_brute_force_on_random_instances() {
        (0..200u64).into_par_iter().for_each(|seed| {
            let mut rng = rand_pcg::Pcg64::seed_from_u64(seed);
            let n = 2 + (seed % 7) as NumVertices;
            let matrix = random_matrix(&mut rng, n, 40);

            let dp = solve_matrix(&matrix);
            let reference = brute_force_solver(&matrix);

            assert_eq!(
                dp.as_ref().map(Tour::cost),
                reference.as_ref().map(Tour::cost),
                "seed: {seed}\n{matrix:?}"
            );

            if let Some(tour) = dp {
                assert!(tour.is_valid(&matrix), "seed: {seed}\n{matrix:?}");
            }
        });
    }

    #[test]
    fn symmetric_tour_cost_is_reversible() {
        for seed in 0..20 {
            let mut rng = rand_pcg::Pcg64::seed_from_u64(seed);
            let matrix = random_symmetric_matrix(&mut rng, 7, 60);

            let tour = solve_matrix(&matrix).unwrap();

            let reversed: Vec<_> = tour.vertices().iter().rev().copied().collect();
            let reversed = Tour::new(reversed, tour.cost());
            assert!(reversed.is_valid(&matrix), "seed: {seed}\n{matrix:?}");
        }
    }

    #[test]
    fn rejects_oversized_instances() {
        let matrix = CostMatrix::new(33);
        assert!(matches!(
            HeldKarp::new(&matrix),
            Err(BuildError::TooManyVertices(33))
        ));
    }
}
