//! Error types for the life expectancy pipeline.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for pipeline operations.
#[derive(Debug, Error)]
pub enum LifeExpectancyError {
    /// The input file could not be read or parsed.
    #[error("Failed to load '{path}': {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: LoadCause,
    },

    /// Region code is not part of the known set.
    #[error("'{0}' is not a valid Region")]
    InvalidRegion(String),

    /// A required column is absent from the raw table.
    #[error("Missing column: '{0}'")]
    MissingColumn(String),

    /// A composite key did not split into exactly four fields.
    #[error("Malformed key at row {row}: '{key}' has {fields} field(s), expected 4")]
    MalformedKey {
        row: usize,
        key: String,
        fields: usize,
    },

    /// A year label could not be parsed as an integer.
    #[error("Cannot coerce column '{column}' to integer: '{value}'")]
    TypeCoercion { column: String, value: String },

    /// The output file could not be written.
    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Underlying cause of a [`LifeExpectancyError::Load`].
#[derive(Debug, Error)]
pub enum LoadCause {
    /// Error opening or reading the file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from the CSV library (including rows of the wrong width).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Structurally unusable content.
    #[error("{0}")]
    Structure(String),
}

impl LifeExpectancyError {
    /// Build a load error for `path`.
    pub fn load(path: &Path, source: impl Into<LoadCause>) -> Self {
        LifeExpectancyError::Load {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, LifeExpectancyError>;
