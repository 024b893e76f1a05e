//! # Properties Crate
//!
//! Read-only statistics over the structures of the `interactions` crate.
//!
//! ## Main Components
//!
//! - **distribution** / **popularity**: descending-sorted per-key counts
//! - **gini**: inequality of a distribution
//! - **density**, **average_rating**, **counts**: closed-form scalar metrics
//! - **temporal**: dense relabeling of chronological key tables
//! - **report**: the ordered, typed `StatisticsReport` handed to writers
//!
//! ## Rust Concepts Demonstrated
//!
//! - **Borrowing views**: every metric holds `&InteractionMatrix` and
//!   computes on demand, so many metrics can read the same matrix at once
//! - **Traits as seams**: `DegreeSource` lets one extractor serve both the
//!   weighted matrix and the impression graph
//! - **Errors as values**: an undefined Gini index is a `MetricError`, not a
//!   silent zero

pub mod average_rating;
pub mod counts;
pub mod density;
pub mod distribution;
pub mod error;
pub mod gini;
pub mod popularity;
pub mod report;
pub mod temporal;

pub use average_rating::AverageRating;
pub use counts::{CountSummary, ImpressionCount, InteractionCount};
pub use density::Density;
pub use distribution::{DegreeSource, Distribution, item_distribution, user_distribution};
pub use error::{MetricError, Result};
pub use gini::{GiniIndex, gini};
pub use popularity::{ImpressionDistribution, PopularityDistribution, RatingDistribution};
pub use report::{ReportBuilder, StatEntry, StatValue, StatisticsReport};
pub use temporal::{Direction, item_timeline, relabel, user_timeline};
