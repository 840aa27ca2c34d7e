//! Statistics Errors

use kidsmotion_data::DataError;
use thiserror::Error;

/// Errors from statistical routines
#[derive(Debug, Error)]
pub enum StatsError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error("Column '{0}' has no non-missing values")]
    EmptyColumn(String),

    #[error("Not enough observations: got {got}, need at least {needed}")]
    InsufficientData { needed: usize, got: usize },

    #[error("Length mismatch: expected {expected} values, got {got}")]
    ShapeMismatch { expected: usize, got: usize },

    #[error("Only a single covariate is supported, got {0}")]
    UnsupportedCovariate(usize),

    #[error("Invalid distribution parameters: {0}")]
    Distribution(String),
}

/// Result alias for statistics operations
pub type Result<T> = std::result::Result<T, StatsError>;
