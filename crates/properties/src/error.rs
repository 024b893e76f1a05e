//! Error types for the properties crate.

use thiserror::Error;

/// A metric that has no defined value for the given input.
///
/// Callers that need a number anyway (e.g. when filling a report) should map
/// this to `f64::NAN`, never to 0.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricError {
    /// Fewer than two keys in the distribution
    #[error("Gini index needs at least 2 keys, found {0}")]
    TooFewKeys(usize),

    /// Every count in the distribution is zero
    #[error("Gini index is undefined for a distribution with zero total mass")]
    ZeroMass,
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, MetricError>;
