//! Sorted count sequences ("distributions").
//!
//! A `Distribution` holds one count per key of a universe, largest first.
//! `DegreeSource` is the seam that lets the same extraction run over both an
//! `InteractionMatrix` and an `ImpressionGraph`.

use crate::error::Result;
use crate::gini;
use interactions::{ImpressionGraph, InteractionMatrix, Key};
use serde::Serialize;
use tracing::debug;

/// Descending-sorted sequence of non-negative counts.
///
/// Sorting is stable, so keys with equal counts keep the order in which they
/// were handed in (registration order for the built-in extractors).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Distribution {
    counts: Vec<usize>,
}

impl Distribution {
    /// Build a distribution from unsorted per-key counts
    pub fn from_counts(mut counts: Vec<usize>) -> Self {
        counts.sort_by(|a, b| b.cmp(a));
        Self { counts }
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.counts
    }

    /// Number of keys (including those with a zero count)
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn max(&self) -> Option<usize> {
        self.counts.first().copied()
    }

    pub fn min(&self) -> Option<usize> {
        self.counts.last().copied()
    }

    /// `(rank, count)` rows, rank 0 being the most popular key
    pub fn ranked(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.counts.iter().copied().enumerate()
    }

    /// Gini index of this distribution
    pub fn gini(&self) -> Result<f64> {
        gini::gini(&self.counts).inspect_err(|e| debug!(keys = self.counts.len(), "undefined gini: {}", e))
    }
}

/// Per-key edge counts of a bipartite structure, in registration order.
pub trait DegreeSource {
    /// Edge count of every registered user
    fn user_degrees(&self) -> Vec<usize>;

    /// Edge count of every registered item
    fn item_degrees(&self) -> Vec<usize>;
}

impl<U: Key, I: Key> DegreeSource for InteractionMatrix<U, I> {
    fn user_degrees(&self) -> Vec<usize> {
        self.users().iter().map(|&u| self.user_degree(u)).collect()
    }

    fn item_degrees(&self) -> Vec<usize> {
        self.items().iter().map(|&i| self.item_degree(i)).collect()
    }
}

impl<U: Key, I: Key> DegreeSource for ImpressionGraph<U, I> {
    fn user_degrees(&self) -> Vec<usize> {
        self.users().iter().map(|&u| self.user_degree(u)).collect()
    }

    fn item_degrees(&self) -> Vec<usize> {
        self.items().iter().map(|&i| self.item_degree(i)).collect()
    }
}

/// Distribution of users by number of edges
pub fn user_distribution(source: &impl DegreeSource) -> Distribution {
    Distribution::from_counts(source.user_degrees())
}

/// Distribution of items by number of edges
pub fn item_distribution(source: &impl DegreeSource) -> Distribution {
    Distribution::from_counts(source.item_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_descending() {
        let distribution = Distribution::from_counts(vec![1, 5, 0, 3]);
        assert_eq!(distribution.as_slice(), &[5, 3, 1, 0]);
        assert_eq!(distribution.total(), 9);
        assert_eq!(distribution.max(), Some(5));
        assert_eq!(distribution.min(), Some(0));
    }

    #[test]
    fn test_ranked_rows() {
        let distribution = Distribution::from_counts(vec![2, 7]);
        let rows: Vec<_> = distribution.ranked().collect();
        assert_eq!(rows, vec![(0, 7), (1, 2)]);
    }

    #[test]
    fn test_empty() {
        let distribution = Distribution::default();
        assert!(distribution.is_empty());
        assert_eq!(distribution.max(), None);
        assert!(distribution.gini().is_err());
    }

    #[test]
    fn test_impression_degrees() {
        let mut graph: ImpressionGraph = ImpressionGraph::new();
        graph.add_user(1);
        graph.add_user(2);
        graph.add_item(7);
        graph.add_item(8);
        graph.add_impression(2, 7);
        graph.add_impression(2, 8);

        assert_eq!(user_distribution(&graph).as_slice(), &[2, 0]);
        assert_eq!(item_distribution(&graph).as_slice(), &[1, 1]);
    }
}
