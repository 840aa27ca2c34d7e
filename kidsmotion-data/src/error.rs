//! Data Errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or querying a [`Dataset`](crate::Dataset)
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed table: {0}")]
    Csv(#[from] csv::Error),

    #[error("Row {row}, column '{column}': cannot parse '{value}' as a number")]
    Parse {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Duplicate column in header: {0}")]
    DuplicateColumn(String),

    #[error("Delimiter must be a single ASCII character, got {0:?}")]
    InvalidDelimiter(char),
}

/// Result alias for data operations
pub type Result<T> = std::result::Result<T, DataError>;
