//! # Data Loader Crate
//!
//! This crate reads recommendation datasets from disk into the structures of
//! the `interactions` crate and assembles their statistics.
//!
//! ## Main Components
//!
//! - **parser**: parse CSV files and event logs into typed records
//! - **contentwise** / **replayer**: build one dataset from parsed records
//! - **statistics**: ordered statistics report of each dataset
//! - **output**: distribution and timeline tables handed to writers
//! - **dataset**: `DatasetKind`, the loader table and the `Analysis` trait
//! - **types** / **error**: domain types and error types
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{DatasetSource, load};
//! use std::path::PathBuf;
//!
//! let source = DatasetSource::Replayer {
//!     folder: PathBuf::from("data/R6B"),
//!     min_interactions: 0,
//! };
//! let mut dataset = load(&source)?;
//!
//! for entry in dataset.statistics().entries() {
//!     println!("{}\t{}", entry.name, entry.value);
//! }
//! let tables = dataset.outputs();
//! ```
//!
//! ## Learning Goals
//!
//! 1. **Error Handling**: fail-fast parsing with `Result<T>` and line context
//! 2. **Parallel Processing**: `rayon::join` to parse files concurrently
//! 3. **Trait Objects**: one `Box<dyn Analysis>` per loaded dataset
//! 4. **Function Pointers**: loaders registered in a lookup table

pub mod contentwise;
pub mod dataset;
pub mod error;
pub mod output;
pub mod parser;
pub mod replayer;
pub mod statistics;
pub mod types;

// Re-export commonly used types for convenience
pub use contentwise::ContentWiseDataset;
pub use dataset::{Analysis, DatasetKind, DatasetSource, Loader, load, loader_for};
pub use error::{DataLoadError, Result};
pub use output::{OutputTable, TableData};
pub use replayer::ReplayerDataset;
pub use statistics::{contentwise_statistics, replayer_statistics};
pub use types::{
    // Type aliases
    RecommendationId,
    SeriesId,
    // Records
    ContentWiseInteraction,
    ContentWiseItem,
    ContentWiseSeries,
    FeatureSignature,
    ImpressionRecord,
    ItemType,
    ReplayerEvent,
};
