//! Average stored weight, globally and per key.

use interactions::{InteractionMatrix, Key};
use rayon::prelude::*;

/// Mean stored weights of an interaction matrix.
///
/// A key without edges averages to 0.0, as does an empty matrix.
pub struct AverageRating<'a, U: Key, I: Key> {
    matrix: &'a InteractionMatrix<U, I>,
}

impl<'a, U: Key, I: Key> AverageRating<'a, U, I> {
    pub fn new(matrix: &'a InteractionMatrix<U, I>) -> Self {
        Self { matrix }
    }

    /// Mean over every stored edge of the matrix
    pub fn average(&self) -> f64 {
        mean(self.matrix.edges().map(|(_, _, weight)| weight))
    }

    pub fn user(&self, user: U) -> f64 {
        mean(self.matrix.user_edges(user).map(|(_, weight)| weight))
    }

    pub fn item(&self, item: I) -> f64 {
        mean(self.matrix.item_edges(item).map(|(_, weight)| weight))
    }

    /// Average of every registered user, in registration order
    pub fn users(&self) -> Vec<(U, f64)> {
        self.matrix
            .users()
            .par_iter()
            .map(|&u| (u, self.user(u)))
            .collect()
    }

    /// Average of every registered item, in registration order
    pub fn items(&self) -> Vec<(I, f64)> {
        self.matrix
            .items()
            .par_iter()
            .map(|&i| (i, self.item(i)))
            .collect()
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}
