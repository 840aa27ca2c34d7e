//! Figure Handles

use crate::error::{PlotError, Result};
use crate::range::{AxisRange, DEFAULT_PAD};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Rendering options shared by every figure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Fractional padding around the data on each axis
    #[serde(default = "default_pad")]
    pub pad: f64,

    /// Width of one panel in pixels
    #[serde(default = "default_panel_width")]
    pub panel_width: u32,

    /// Height of one panel in pixels
    #[serde(default = "default_panel_height")]
    pub panel_height: u32,
}

fn default_pad() -> f64 {
    DEFAULT_PAD
}

fn default_panel_width() -> u32 {
    300
}

fn default_panel_height() -> u32 {
    300
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            pad: default_pad(),
            panel_width: default_panel_width(),
            panel_height: default_panel_height(),
        }
    }
}

/// Description of one panel of a figure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axes {
    /// Panel caption
    pub title: Option<String>,
    /// Label under the x axis
    pub x_label: String,
    /// Label beside the y axis
    pub y_label: String,
    /// Visible x interval
    pub x_range: AxisRange,
    /// Visible y interval
    pub y_range: AxisRange,
}

/// A rendered SVG figure together with its panels
#[derive(Debug, Clone)]
pub struct Figure {
    svg: String,
    size: (u32, u32),
    axes: Vec<Axes>,
}

impl Figure {
    pub(crate) fn new(svg: String, size: (u32, u32), axes: Vec<Axes>) -> Self {
        Self { svg, size, axes }
    }

    /// SVG document
    pub fn svg(&self) -> &str {
        &self.svg
    }

    /// Pixel size as `(width, height)`
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Panels from left to right
    pub fn axes(&self) -> &[Axes] {
        &self.axes
    }

    /// Write the SVG document to `path`
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, &self.svg).map_err(|source| PlotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "figure saved");
        Ok(())
    }
}
