//! Interaction and impression counts per key.

use crate::distribution::DegreeSource;
use interactions::{ImpressionGraph, InteractionMatrix, Key};
use serde::Serialize;

/// Average, minimum and maximum edge count over one side of a structure.
///
/// `average` divides the distinct edge total by the universe size, so keys
/// without edges pull it down. `min`/`max` run over the actual per-key counts.
/// All three are 0 for an empty universe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CountSummary {
    pub average: f64,
    pub min: usize,
    pub max: usize,
}

impl CountSummary {
    pub fn from_degrees(total: usize, degrees: &[usize]) -> Self {
        let average = if degrees.is_empty() {
            0.0
        } else {
            total as f64 / degrees.len() as f64
        };
        Self {
            average,
            min: degrees.iter().copied().min().unwrap_or(0),
            max: degrees.iter().copied().max().unwrap_or(0),
        }
    }
}

/// Interactions per user and per item
pub struct InteractionCount<'a, U: Key, I: Key> {
    matrix: &'a InteractionMatrix<U, I>,
}

impl<'a, U: Key, I: Key> InteractionCount<'a, U, I> {
    pub fn new(matrix: &'a InteractionMatrix<U, I>) -> Self {
        Self { matrix }
    }

    pub fn users(&self) -> CountSummary {
        CountSummary::from_degrees(self.matrix.num_edges(), &self.matrix.user_degrees())
    }

    pub fn items(&self) -> CountSummary {
        CountSummary::from_degrees(self.matrix.num_edges(), &self.matrix.item_degrees())
    }

    pub fn relevant_users(&self) -> CountSummary {
        let degrees: Vec<usize> = self
            .matrix
            .users()
            .iter()
            .map(|&u| self.matrix.relevant_user_degree(u))
            .collect();
        CountSummary::from_degrees(self.matrix.num_relevant_edges(), &degrees)
    }

    pub fn relevant_items(&self) -> CountSummary {
        let degrees: Vec<usize> = self
            .matrix
            .items()
            .iter()
            .map(|&i| self.matrix.relevant_item_degree(i))
            .collect();
        CountSummary::from_degrees(self.matrix.num_relevant_edges(), &degrees)
    }
}

/// Impressions per user and per item
pub struct ImpressionCount<'a, U: Key, I: Key> {
    graph: &'a ImpressionGraph<U, I>,
}

impl<'a, U: Key, I: Key> ImpressionCount<'a, U, I> {
    pub fn new(graph: &'a ImpressionGraph<U, I>) -> Self {
        Self { graph }
    }

    pub fn users(&self) -> CountSummary {
        CountSummary::from_degrees(self.graph.num_impressions(), &self.graph.user_degrees())
    }

    pub fn items(&self) -> CountSummary {
        CountSummary::from_degrees(self.graph.num_impressions(), &self.graph.item_degrees())
    }
}
