#![warn(missing_docs)]
//! # Kidsmotion
//!
//! Head-motion analysis helpers for developmental neuroimaging studies.
//!
//! Kidsmotion works on a phenotypic table with one row per participant
//! (identifier, age at scan, mean framewise displacement, percentage of
//! high-motion frames, plus any regional measures):
//! - **Selection**: fixed inclusion rules (`clean`), per-analysis motion and
//!   age thresholds (`filter`) and seeded random subsamples (`sample`)
//! - **Regional statistics**: one-sample t-tests per region with
//!   Benjamini–Hochberg FDR correction and significance stars
//! - **Correlations**: Pearson and partial correlations with
//!   publication-style `r = .., p = ..` formatting
//! - **Figures**: motion histograms, motion-versus-age scatter plots and
//!   box plots of resampled correlations under several thresholds, as SVG
//! - **Reports**: JSON, CSV and terminal renderings of an analysis
//!
//! ## Quick Start
//!
//! ```no_run
//! use kidsmotion::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let df = clean(&load("phenotypic.csv")?);
//! let df = filter(&df, 50.0, 6, 18, &MotionMeasure::PercentFd)?;
//!
//! let result = regional_one_sample_ttest(&df, &["lh_thickness", "rh_thickness"])?;
//! for row in result.rows() {
//!     println!("{}: t = {:.2} {}", row.region, row.t, row.stars);
//! }
//!
//! histogram_motion(&df)?.save("histogram_motion.svg")?;
//! # Ok(())
//! # }
//! ```

// Re-export data types
pub use kidsmotion_data::{
    AGE_YEARS_COLUMN, DataError, Dataset, FilterCriteria, MotionMeasure, Schema, SchemaConfig,
    Subject, clean, filter, from_reader, load, load_with, sample,
};

// Re-export stats
pub use kidsmotion_stats::{
    CorrelationReport, CorrelationResult, FdrCorrection, RegionRow, RegionalTTest,
    ResampleConfig, Significance, StatsError, SummaryStatistics, TTestConfig, TTestResult,
    compute_summary, correlate, fdr_correction, format_r_p, one_sample_ttest,
    partial_correlation, pearson, regional_one_sample_ttest, regional_ttest_with,
    resampled_correlations,
};

// Re-export plotting
pub use kidsmotion_plot::{
    AxisRange, Figure, Group, PlotConfig, PlotError, compare_groups_boxplots,
    corr_motion_age, histogram_motion, padded_range,
};

// Re-export reporting
pub use kidsmotion_report::{AnalysisReport, OutputFormat, ReportError};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Dataset, FilterCriteria, Group, MotionMeasure, clean, compare_groups_boxplots, correlate,
        corr_motion_age, filter, format_r_p, histogram_motion, load, regional_one_sample_ttest,
        sample,
    };
}

/// Run the Kidsmotion CLI.
///
/// Call this from a binary's `main()`:
/// ```ignore
/// fn main() {
///     kidsmotion::run().unwrap();
/// }
/// ```
pub use kidsmotion_cli::run;
