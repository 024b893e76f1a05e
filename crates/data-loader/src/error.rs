//! Error types for the data-loader crate.
//!
//! Rust error handling concepts demonstrated:
//! - thiserror for defining custom error types
//! - Enum variants carrying the file and line of a bad record
//! - Automatic `Display` and `Error` trait implementations
//!
//! Only unreadable input is an error here. Records that parse fine but
//! reference unknown keys are skipped by the loaders with a warning.

use thiserror::Error;

/// Errors that can occur while reading a dataset from disk
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File or folder could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line in data file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A CSV header lacks a column the loader needs
    #[error("Missing column '{column}' in header of {file}")]
    MissingColumn { file: String, column: String },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Expected number of fields in a line doesn't match actual
    #[error("Expected {expected} fields but found {found} in line {line} of {file}")]
    FieldCountMismatch {
        file: String,
        expected: usize,
        found: usize,
        line: usize,
    },

    /// The input does not fit the requested dataset kind
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
