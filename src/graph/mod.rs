pub mod matrix;
pub mod vertex_set;

pub type Vertex = u32;
pub type NumVertices = Vertex;

/// Edge and tour costs. Wide enough that a sum over any tour of costs
/// bounded by [`MAX_EDGE_COST`] stays far below [`INFINITE_COST`].
pub type Cost = u64;

/// Sentinel for "no edge" and "no completion possible". Never produced by
/// summing legitimate edge costs; all accumulation saturates so the
/// sentinel survives further addition.
pub const INFINITE_COST: Cost = Cost::MAX;

/// Largest finite edge cost the reader accepts.
pub const MAX_EDGE_COST: Cost = u32::MAX as Cost;

/// Every tour starts and ends here.
pub const START_VERTEX: Vertex = 0;

use std::ops::Range;

pub use matrix::*;
pub use vertex_set::*;

/// Provides getters pertaining to the size of a graph
pub trait GraphOrder {
    /// Returns the number of vertices of the graph
    fn number_of_vertices(&self) -> NumVertices;

    /// Return the number of vertices as usize
    fn len(&self) -> usize {
        self.number_of_vertices() as usize
    }

    /// Returns an iterator over V.
    fn vertices(&self) -> Range<Vertex> {
        0..self.number_of_vertices()
    }

    /// Returns true if the graph has no vertices
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read access to the directed edge costs of a complete graph
pub trait EdgeCosts {
    /// Returns the cost of the directed edge *(u,v)*.
    /// ** Panics if u >= n or v >= n **
    fn cost(&self, u: Vertex, v: Vertex) -> Cost;
}

/// Read access to the display labels of the vertices
pub trait VertexLabels {
    /// Returns the human-readable label of vertex `u`.
    /// ** Panics if u >= n **
    fn label(&self, u: Vertex) -> &str;
}

pub trait GraphNew {
    /// Creates a graph with n vertices, all edge costs zero and default labels
    fn new(n: NumVertices) -> Self;
}

/// Provides functions to assign costs and labels; used by the instance reader
pub trait GraphEdit {
    /// Sets the cost of the directed edge *(u,v)*.
    /// ** Panics if u >= n or v >= n **
    fn set_cost(&mut self, u: Vertex, v: Vertex, cost: Cost);

    /// Replaces the label of vertex `u`.
    /// ** Panics if u >= n **
    fn set_label(&mut self, u: Vertex, label: String);
}
