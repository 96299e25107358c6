use super::*;
use std::fmt;

/// A complete weighted graph stored as a row-major square cost matrix
/// plus one display label per vertex. Costs may be asymmetric; a missing
/// edge is modelled as [`INFINITE_COST`]. Labels default to the 1-based
/// vertex number.
#[derive(Clone)]
pub struct CostMatrix {
    labels: Vec<String>,
    costs: Vec<Cost>,
}

impl CostMatrix {
    fn entry(&self, u: Vertex, v: Vertex) -> usize {
        debug_assert!(u < self.number_of_vertices());
        debug_assert!(v < self.number_of_vertices());
        u as usize * self.len() + v as usize
    }

    pub fn test_only_from<R: AsRef<[Cost]>>(rows: impl IntoIterator<Item = R>) -> Self {
        let rows: Vec<Vec<Cost>> = rows.into_iter().map(|r| r.as_ref().to_vec()).collect();
        let mut matrix = Self::new(rows.len() as NumVertices);

        for (u, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), rows.len());
            for (v, &cost) in row.iter().enumerate() {
                matrix.set_cost(u as Vertex, v as Vertex, cost);
            }
        }

        matrix
    }
}

impl GraphOrder for CostMatrix {
    fn number_of_vertices(&self) -> NumVertices {
        self.labels.len() as NumVertices
    }
}

impl EdgeCosts for CostMatrix {
    fn cost(&self, u: Vertex, v: Vertex) -> Cost {
        self.costs[self.entry(u, v)]
    }
}

impl VertexLabels for CostMatrix {
    fn label(&self, u: Vertex) -> &str {
        &self.labels[u as usize]
    }
}

impl GraphNew for CostMatrix {
    fn new(n: NumVertices) -> Self {
        Self {
            labels: (1..=n).map(|u| u.to_string()).collect(),
            costs: vec![0; n as usize * n as usize],
        }
    }
}

impl GraphEdit for CostMatrix {
    fn set_cost(&mut self, u: Vertex, v: Vertex, cost: Cost) {
        let entry = self.entry(u, v);
        self.costs[entry] = cost;
    }

    fn set_label(&mut self, u: Vertex, label: String) {
        self.labels[u as usize] = label;
    }
}

impl fmt::Debug for CostMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for u in self.vertices() {
            write!(f, "{}:", self.label(u))?;
            for v in self.vertices() {
                match self.cost(u, v) {
                    INFINITE_COST => write!(f, " inf")?,
                    c => write!(f, " {c}")?,
                }
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
