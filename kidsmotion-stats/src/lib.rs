#![warn(missing_docs)]
//! Kidsmotion Statistics
//!
//! Statistical routines for head-motion analyses:
//! - Regional one-sample t-tests with significance bands
//! - Benjamini–Hochberg false discovery rate correction
//! - Pearson and first-order partial correlation
//! - Resampled correlation distributions computed in parallel
//! - Descriptive summaries and box-plot quartiles

mod correlation;
mod error;
mod fdr;
mod format;
mod percentiles;
mod regional;
mod resample;
mod significance;
mod summary;
mod ttest;

pub use correlation::{
    CorrelationResult, LinearFit, complete_cases, correlate, linear_fit, partial_correlation,
    pearson, residualize,
};
pub use error::{Result, StatsError};
pub use fdr::{FdrCorrection, fdr_correction};
pub use format::{CorrelationReport, DEFAULT_R_DECIMALS, format_r_p};
pub use percentiles::{Quartiles, compute_percentile};
pub use regional::{
    RegionRow, RegionalTTest, TTestConfig, regional_one_sample_ttest, regional_ttest_with,
};
pub use resample::{
    DEFAULT_RESAMPLE_ITERATIONS, DEFAULT_SAMPLE_SIZE, ResampleConfig, resampled_correlations,
};
pub use significance::Significance;
pub use summary::{SummaryStatistics, compute_summary, mean, std_dev};
pub use ttest::{TTestResult, one_sample_ttest};

/// Default false discovery rate for regional tests
pub const DEFAULT_FDR_ALPHA: f64 = 0.05;

/// Population mean regional values are tested against
pub const DEFAULT_POPULATION_MEAN: f64 = 0.0;
