//! Popularity, impression and rating-value distributions.

use crate::distribution::{Distribution, DegreeSource};
use interactions::{ImpressionGraph, InteractionMatrix, Key};
use std::collections::HashMap;

/// Per-user and per-item edge-count distributions of an interaction matrix,
/// with relevance-filtered variants.
pub struct PopularityDistribution<'a, U: Key, I: Key> {
    matrix: &'a InteractionMatrix<U, I>,
}

impl<'a, U: Key, I: Key> PopularityDistribution<'a, U, I> {
    pub fn new(matrix: &'a InteractionMatrix<U, I>) -> Self {
        Self { matrix }
    }

    /// Number of items rated by each user, largest first
    pub fn users(&self) -> Distribution {
        Distribution::from_counts(self.matrix.user_degrees())
    }

    /// Number of users who rated each item, largest first
    pub fn items(&self) -> Distribution {
        Distribution::from_counts(self.matrix.item_degrees())
    }

    pub fn relevant_users(&self) -> Distribution {
        let counts = self
            .matrix
            .users()
            .iter()
            .map(|&u| self.matrix.relevant_user_degree(u))
            .collect();
        Distribution::from_counts(counts)
    }

    pub fn relevant_items(&self) -> Distribution {
        let counts = self
            .matrix
            .items()
            .iter()
            .map(|&i| self.matrix.relevant_item_degree(i))
            .collect();
        Distribution::from_counts(counts)
    }
}

/// Per-user and per-item impression-count distributions.
///
/// Impressions carry no weight, so there is no relevant variant.
pub struct ImpressionDistribution<'a, U: Key, I: Key> {
    graph: &'a ImpressionGraph<U, I>,
}

impl<'a, U: Key, I: Key> ImpressionDistribution<'a, U, I> {
    pub fn new(graph: &'a ImpressionGraph<U, I>) -> Self {
        Self { graph }
    }

    /// Number of items shown to each user, largest first
    pub fn users(&self) -> Distribution {
        Distribution::from_counts(self.graph.user_degrees())
    }

    /// Number of users each item was shown to, largest first
    pub fn items(&self) -> Distribution {
        Distribution::from_counts(self.graph.item_degrees())
    }
}

/// How many stored edges carry each distinct weight value.
pub struct RatingDistribution<'a, U: Key, I: Key> {
    matrix: &'a InteractionMatrix<U, I>,
}

impl<'a, U: Key, I: Key> RatingDistribution<'a, U, I> {
    pub fn new(matrix: &'a InteractionMatrix<U, I>) -> Self {
        Self { matrix }
    }

    /// `(weight, number of edges)` pairs, ascending by weight
    pub fn counts(&self) -> Vec<(f64, usize)> {
        let mut by_value: HashMap<u64, usize> = HashMap::new();
        for (_, _, weight) in self.matrix.edges() {
            // fold -0.0 into 0.0 so both land in one bucket
            let weight = if weight == 0.0 { 0.0 } else { weight };
            *by_value.entry(weight.to_bits()).or_insert(0) += 1;
        }

        let mut counts: Vec<(f64, usize)> = by_value
            .into_iter()
            .map(|(bits, count)| (f64::from_bits(bits), count))
            .collect();
        counts.sort_by(|a, b| a.0.total_cmp(&b.0));
        counts
    }
}
