use crate::graph::*;
use itertools::Itertools;
use std::io::Write;

/// A closed tour: the visited vertices in order, starting and ending at
/// [`START_VERTEX`], together with its total cost. The degenerate
/// zero-vertex instance is represented by an empty sequence of cost 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tour {
    vertices: Vec<Vertex>,
    cost: Cost,
}

impl Tour {
    pub fn new(vertices: Vec<Vertex>, cost: Cost) -> Self {
        Self { vertices, cost }
    }

    /// Returns the total cost of the tour.
    ///
    /// # Example
    /// ```
    /// use tsp::utils::Tour;
    /// let tour = Tour::new(vec![0, 1, 0], 12);
    /// assert_eq!(tour.cost(), 12);
    /// ```
    pub fn cost(&self) -> Cost {
        self.cost
    }

    /// Returns the visited vertices in order, including the closing
    /// repetition of the start vertex.
    ///
    /// # Example
    /// ```
    /// use tsp::utils::Tour;
    /// let tour = Tour::new(vec![0, 1, 0], 12);
    /// assert_eq!(tour.vertices(), &[0, 1, 0]);
    /// ```
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Returns an iterator over the visited vertices in order.
    pub fn iter(&self) -> impl Iterator<Item = Vertex> + '_ {
        self.vertices.iter().copied()
    }

    /// Recomputes the cost of the tour by walking its edges in `graph`.
    pub fn compute_cost(&self, graph: &impl EdgeCosts) -> Cost {
        self.vertices
            .windows(2)
            .fold(0, |sum: Cost, leg| sum.saturating_add(graph.cost(leg[0], leg[1])))
    }

    /// Returns true if the tour is a Hamiltonian cycle of `graph` that
    /// starts and ends at [`START_VERTEX`] and whose stored cost matches
    /// the edge costs it traverses.
    pub fn is_valid(&self, graph: &(impl GraphOrder + EdgeCosts)) -> bool {
        let n = graph.number_of_vertices();

        if n == 0 {
            return self.vertices.is_empty() && self.cost == 0;
        }

        if self.vertices.len() != n as usize + 1
            || self.vertices.first() != Some(&START_VERTEX)
            || self.vertices.last() != Some(&START_VERTEX)
        {
            return false;
        }

        let mut visited = vec![false; n as usize];
        for &v in &self.vertices[..n as usize] {
            if v >= n || visited[v as usize] {
                return false;
            }
            visited[v as usize] = true;
        }

        self.compute_cost(graph) == self.cost
    }

    /// Writes the tour as a single human-readable result line using the
    /// labels supplied by `graph`, e.g. `Optimal Tour Cost = [12, <1,2,1>]`.
    pub fn write<W: Write>(&self, graph: &impl VertexLabels, mut writer: W) -> anyhow::Result<()> {
        writeln!(
            &mut writer,
            "Optimal Tour Cost = [{}, <{}>]",
            self.cost,
            self.iter().map(|v| graph.label(v)).join(",")
        )?;
        Ok(())
    }
}
