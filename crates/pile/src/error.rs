//! Error types for the Pile library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Pile operations.
#[derive(Debug, Error)]
pub enum PileError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error flushing or unwrapping an output stream.
    #[error("IO error: {0}")]
    Stream(#[from] std::io::Error),

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A column name or alias that matches no column.
    #[error("Invalid column reference: '{0}'")]
    InvalidReference(String),

    /// A resolved position past the end of a record's values.
    #[error("Column position {position} out of bounds for record of length {len}")]
    OutOfBounds { position: usize, len: usize },

    /// Serialization was requested with no sink to write to.
    #[error("No output sink associated with record")]
    MissingSink,

    /// Input and output of a file transform are the same file.
    #[error("Input and output refer to the same file: '{}'", .0.display())]
    SameFile(PathBuf),

    /// Output bytes were not valid UTF-8.
    #[error("Encoding error: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for Pile operations.
pub type Result<T> = std::result::Result<T, PileError>;
