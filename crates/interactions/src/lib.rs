//! # Interactions Crate
//!
//! In-memory storage for the interaction logs of a recommendation dataset.
//!
//! ## Main Components
//!
//! - **matrix**: `InteractionMatrix`, weighted user-item edges with a
//!   configurable repeat policy and relevance threshold
//! - **impressions**: `ImpressionGraph`, which items each user was shown
//! - **temporal**: `TemporalLog`, timestamped events sorted on demand
//! - **registry**: dense, ordered key registries shared by all of the above
//! - **types**: id aliases, `MatrixConfig` and the `AddOutcome` of a write
//!
//! ## Example Usage
//!
//! ```
//! use interactions::{InteractionMatrix, MatrixConfig};
//!
//! let mut matrix: InteractionMatrix = InteractionMatrix::new(MatrixConfig::implicit_feedback());
//! matrix.add_user(1);
//! matrix.add_item(10);
//!
//! assert!(matrix.add_edge(1, 10, 1.0).is_added());
//! assert!(!matrix.add_edge(2, 10, 1.0).is_accepted()); // user 2 was never registered
//! assert_eq!(matrix.num_edges(), 1);
//! ```
//!
//! ## Lifecycle
//!
//! Structures are populated once by a loader, then only read. Nothing here
//! locks: share them behind `Arc` (or plain references) once loading is done.

pub mod impressions;
pub mod matrix;
pub mod registry;
pub mod temporal;
pub mod types;

// Re-export commonly used types for convenience
pub use impressions::ImpressionGraph;
pub use matrix::{InteractionMatrix, WriteCounters};
pub use registry::KeyRegistry;
pub use temporal::{TemporalLog, Timepoint};
pub use types::{AddOutcome, ItemId, Key, MatrixConfig, Rejection, Timestamp, UserId};
