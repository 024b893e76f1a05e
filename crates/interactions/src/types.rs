//! Shared types for the interaction structures.
//!
//! Key concepts:
//! - Type aliases for the identifiers used by the bundled datasets
//! - A `Key` trait bound so matrices can be keyed by any small copyable id
//! - `AddOutcome` reports what a write did instead of failing
//! - `MatrixConfig` fixes how an `InteractionMatrix` treats weights

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

// =============================================================================
// Type Aliases
// =============================================================================

/// Identifier of a user (the left side of every bipartite structure)
pub type UserId = u32;

/// Identifier of an item (the right side of every bipartite structure)
pub type ItemId = u32;

/// Milliseconds since the Unix epoch
pub type Timestamp = i64;

/// Anything usable as a registry key.
///
/// Blanket-implemented, so `u32`, `u64`, `&'static str` and friends all work.
pub trait Key: Copy + Eq + Hash + Debug + Send + Sync {}

impl<T> Key for T where T: Copy + Eq + Hash + Debug + Send + Sync {}

// =============================================================================
// Write Outcomes
// =============================================================================

/// Why a write left the structure untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rejection {
    /// The left key was never registered
    UnknownUser,
    /// The right key was never registered
    UnknownItem,
    /// The edge already exists and the structure does not update repeats
    Duplicate,
    /// The weight was NaN
    InvalidWeight,
}

/// Result of an `add_*` call.
///
/// Rejections are ordinary values: ingestion keeps going after one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddOutcome {
    /// A new edge was stored
    Added,
    /// An existing edge had its weight changed
    Updated,
    /// Nothing changed
    Rejected(Rejection),
}

impl AddOutcome {
    /// True for `Added` and `Updated`.
    pub fn is_accepted(self) -> bool {
        !matches!(self, AddOutcome::Rejected(_))
    }

    /// True only when a new edge was created.
    pub fn is_added(self) -> bool {
        matches!(self, AddOutcome::Added)
    }
}

// =============================================================================
// Matrix Configuration
// =============================================================================

/// Parameters fixed when an `InteractionMatrix` is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatrixConfig {
    /// Weights at or above this value are relevant
    pub relevance_threshold: f64,
    /// Store 1.0 / 0.0 instead of the raw weight
    pub binarize: bool,
    /// Whether a second write to an existing edge updates it
    ///
    /// - binarized: the stored value accumulates
    /// - raw: the stored value becomes the maximum seen
    pub accumulate_on_repeat: bool,
}

impl MatrixConfig {
    /// Raw weights, repeats rejected.
    pub fn new(relevance_threshold: f64) -> Self {
        Self {
            relevance_threshold,
            binarize: false,
            accumulate_on_repeat: false,
        }
    }

    /// Preset for implicit feedback logs: every event counts as a positive
    /// and repeated events accumulate.
    pub fn implicit_feedback() -> Self {
        Self {
            relevance_threshold: 0.0,
            binarize: true,
            accumulate_on_repeat: true,
        }
    }

    /// Configure binarization (default: false)
    pub fn with_binarize(mut self, binarize: bool) -> Self {
        self.binarize = binarize;
        self
    }

    /// Configure repeat handling (default: false)
    pub fn with_accumulate_on_repeat(mut self, accumulate: bool) -> Self {
        self.accumulate_on_repeat = accumulate;
        self
    }

    /// Whether a raw incoming weight meets the threshold.
    pub fn meets_threshold(&self, raw: f64) -> bool {
        raw >= self.relevance_threshold
    }

    /// Value actually stored for a raw incoming weight.
    pub fn stored_value(&self, raw: f64) -> f64 {
        if self.binarize {
            if self.meets_threshold(raw) { 1.0 } else { 0.0 }
        } else {
            raw
        }
    }

    /// Whether an already stored weight is relevant.
    ///
    /// Binarized matrices hold 0/1 flags or positive accumulations, so any
    /// positive value is relevant there regardless of the threshold.
    pub fn is_relevant(&self, stored: f64) -> bool {
        if self.binarize {
            stored > 0.0
        } else {
            stored >= self.relevance_threshold
        }
    }
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binarized_storage() {
        let config = MatrixConfig::new(3.0).with_binarize(true);
        assert_eq!(config.stored_value(4.0), 1.0);
        assert_eq!(config.stored_value(3.0), 1.0);
        assert_eq!(config.stored_value(2.5), 0.0);
        assert!(config.is_relevant(1.0));
        assert!(!config.is_relevant(0.0));
    }

    #[test]
    fn test_raw_storage() {
        let config = MatrixConfig::new(3.0);
        assert_eq!(config.stored_value(2.5), 2.5);
        assert!(config.is_relevant(3.0));
        assert!(!config.is_relevant(2.9));
    }

    #[test]
    fn test_outcome_flags() {
        assert!(AddOutcome::Added.is_accepted());
        assert!(AddOutcome::Updated.is_accepted());
        assert!(!AddOutcome::Updated.is_added());
        assert!(!AddOutcome::Rejected(Rejection::Duplicate).is_accepted());
    }
}
