//! Axis Ranges

use crate::error::{PlotError, Result};
use serde::{Deserialize, Serialize};

/// Fraction of the data span added on each side of an axis
pub const DEFAULT_PAD: f64 = 0.05;

/// Maximum number of labelled ticks per axis
pub const MAX_TICKS: usize = 5;

/// Closed interval shown along one axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    /// Lower limit
    pub min: f64,
    /// Upper limit
    pub max: f64,
}

impl AxisRange {
    /// Width of the interval
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Whether `value` lies inside the interval
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Smallest range covering both `self` and `value`
    pub fn including(self, value: f64) -> Self {
        Self {
            min: self.min.min(value),
            max: self.max.max(value),
        }
    }

    pub(crate) fn as_range(&self) -> std::ops::Range<f64> {
        self.min..self.max
    }
}

/// Data limits widened by `pad` times the data span on both sides
///
/// Non-finite values are ignored. A constant sample is widened by 0.5 on
/// each side so the axis still has extent.
///
/// ```
/// use kidsmotion_plot::padded_range;
///
/// let range = padded_range(&[0.0, 10.0], 0.05).unwrap();
/// assert_eq!((range.min, range.max), (-0.5, 10.5));
/// ```
pub fn padded_range(values: &[f64], pad: f64) -> Result<AxisRange> {
    let (min, max) = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if min > max {
        return Err(PlotError::NoData("no finite values".to_string()));
    }

    let span = max - min;
    if span == 0.0 {
        return Ok(AxisRange {
            min: min - 0.5,
            max: max + 0.5,
        });
    }

    Ok(AxisRange {
        min: min - span * pad,
        max: max + span * pad,
    })
}
