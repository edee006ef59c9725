//! Error types for reading and writing Matrix Market files

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the Matrix Market error
pub type Result<T> = std::result::Result<T, MatrixMarketError>;

/// Errors raised while reading or writing a Matrix Market file
///
/// Every variant is fatal for the file at hand; nothing is retried.
#[derive(Error, Debug)]
pub enum MatrixMarketError {
    /// The file could not be opened, read or written
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading from an unnamed stream failed
    #[error("I/O error: {0}")]
    Stream(#[from] std::io::Error),

    /// The `%%MatrixMarket` banner line could not be parsed
    #[error("Could not process Matrix Market banner: {0}")]
    MalformedBanner(String),

    /// Well-formed banner describing a kind of matrix this crate does not handle
    #[error("Unsupported matrix kind: {0}")]
    Unsupported(String),

    /// The `N M NZ` size line is missing or malformed
    #[error("Could not read size information: {0}")]
    MalformedSize(String),

    /// A data line could not be parsed
    #[error("Malformed entry on line {line}: {reason}")]
    MalformedEntry { line: usize, reason: String },

    /// A one-based index is zero or larger than the declared dimension
    #[error("Entry on line {line} has index ({row}, {col}) outside {n_rows} x {n_cols}")]
    IndexOutOfBounds {
        line: usize,
        row: usize,
        col: usize,
        n_rows: usize,
        n_cols: usize,
    },

    /// The file ended before the declared number of entries was read
    #[error("Expected {expected} entries, found {found}")]
    MissingEntries { expected: usize, found: usize },

    /// A value does not fit the requested value type
    #[error("Value {value} on line {line} cannot be represented in the target type")]
    ValueCast { line: usize, value: f64 },
}
