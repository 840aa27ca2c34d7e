//! Plotting Errors

use kidsmotion_data::DataError;
use kidsmotion_stats::StatsError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during figure generation
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("Nothing to plot: {0}")]
    NoData(String),

    #[error("Failed to render figure: {0}")]
    Render(String),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Stats(#[from] StatsError),

    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result alias for plotting operations
pub type Result<T> = std::result::Result<T, PlotError>;

pub(crate) fn render<E: std::fmt::Display>(e: E) -> PlotError {
    PlotError::Render(e.to_string())
}
