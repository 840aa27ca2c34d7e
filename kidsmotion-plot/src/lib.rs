#![warn(missing_docs)]
//! Kidsmotion Plotting
//!
//! SVG figures rendered with `plotters`. Every function returns a
//! [`Figure`] holding the document and a description of its panels, so
//! callers can inspect axis limits or write the file with [`Figure::save`].

mod error;
mod figure;
mod groups;
mod motion;
mod range;

pub use error::{PlotError, Result};
pub use figure::{Axes, Figure, PlotConfig};
pub use groups::{Group, compare_groups_boxplots, compare_groups_boxplots_with};
pub use motion::{corr_motion_age, corr_motion_age_with, histogram_motion, histogram_motion_with};
pub use range::{AxisRange, DEFAULT_PAD, MAX_TICKS, padded_range};
