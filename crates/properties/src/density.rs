//! Density of an interaction matrix.

use interactions::{InteractionMatrix, Key};

/// Fraction of all user x item pairs that carry an edge.
///
/// Returns 0.0 when either universe is empty.
pub struct Density<'a, U: Key, I: Key> {
    matrix: &'a InteractionMatrix<U, I>,
}

impl<'a, U: Key, I: Key> Density<'a, U, I> {
    pub fn new(matrix: &'a InteractionMatrix<U, I>) -> Self {
        Self { matrix }
    }

    /// Density counting every distinct edge
    pub fn density(&self) -> f64 {
        self.ratio(self.matrix.num_edges())
    }

    /// Density counting only relevant edges
    pub fn relevant_density(&self) -> f64 {
        self.ratio(self.matrix.num_relevant_edges())
    }

    fn ratio(&self, edges: usize) -> f64 {
        let cells = self.matrix.num_users() as f64 * self.matrix.num_items() as f64;
        if cells == 0.0 {
            0.0
        } else {
            edges as f64 / cells
        }
    }
}
