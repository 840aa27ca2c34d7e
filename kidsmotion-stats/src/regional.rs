//! Regional One-Sample t-Tests
//!
//! Tests every region column against zero, annotates each raw p-value with
//! a significance band, then applies FDR correction across the whole family
//! of regions.

use crate::error::{Result, StatsError};
use crate::fdr::fdr_correction;
use crate::significance::Significance;
use crate::ttest::one_sample_ttest;
use crate::{DEFAULT_FDR_ALPHA, DEFAULT_POPULATION_MEAN};
use kidsmotion_data::Dataset;

/// Configuration for regional t-tests
#[derive(Debug, Clone)]
pub struct TTestConfig {
    /// Population mean tested against
    pub popmean: f64,
    /// FDR level used for the rejection mask
    pub fdr_alpha: f64,
}

impl Default for TTestConfig {
    fn default() -> Self {
        Self {
            popmean: DEFAULT_POPULATION_MEAN,
            fdr_alpha: DEFAULT_FDR_ALPHA,
        }
    }
}

/// Per-region test results as parallel vectors in input order
#[derive(Debug, Clone, PartialEq)]
pub struct RegionalTTest {
    /// Region column names
    pub regions: Vec<String>,
    /// Sample means
    pub means: Vec<f64>,
    /// Sample standard deviations (n - 1 denominator)
    pub stds: Vec<f64>,
    /// t statistics
    pub ts: Vec<f64>,
    /// Uncorrected two-sided p-values
    pub ps: Vec<f64>,
    /// Benjamini–Hochberg adjusted p-values
    pub fdr_ps: Vec<f64>,
    /// Rejections at the configured FDR level
    pub fdr_rejected: Vec<bool>,
    /// Bands of the uncorrected p-values
    pub stars: Vec<Significance>,
}

/// One region's slice of a [`RegionalTTest`]
#[derive(Debug, Clone, Copy, PartialEq)]
#[allow(missing_docs)]
pub struct RegionRow<'a> {
    pub region: &'a str,
    pub mean: f64,
    pub std: f64,
    pub t: f64,
    pub p: f64,
    pub fdr_p: f64,
    pub fdr_rejected: bool,
    pub stars: Significance,
}

impl RegionalTTest {
    /// Number of regions tested
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether no regions were tested
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Results for the region at `index`
    pub fn row(&self, index: usize) -> Option<RegionRow<'_>> {
        Some(RegionRow {
            region: self.regions.get(index)?,
            mean: self.means[index],
            std: self.stds[index],
            t: self.ts[index],
            p: self.ps[index],
            fdr_p: self.fdr_ps[index],
            fdr_rejected: self.fdr_rejected[index],
            stars: self.stars[index],
        })
    }

    /// Results for a named region
    pub fn get(&self, region: &str) -> Option<RegionRow<'_>> {
        let index = self.regions.iter().position(|r| r == region)?;
        self.row(index)
    }

    /// All rows in input order
    pub fn rows(&self) -> impl Iterator<Item = RegionRow<'_>> + '_ {
        (0..self.len()).filter_map(move |i| self.row(i))
    }
}

/// One-sample t-test of each region against zero with FDR correction
pub fn regional_one_sample_ttest<S: AsRef<str>>(
    df: &Dataset,
    regions: &[S],
) -> Result<RegionalTTest> {
    regional_ttest_with(df, regions, &TTestConfig::default())
}

/// Regional t-tests with an explicit configuration
pub fn regional_ttest_with<S: AsRef<str>>(
    df: &Dataset,
    regions: &[S],
    config: &TTestConfig,
) -> Result<RegionalTTest> {
    let n = regions.len();
    let mut result = RegionalTTest {
        regions: Vec::with_capacity(n),
        means: Vec::with_capacity(n),
        stds: Vec::with_capacity(n),
        ts: Vec::with_capacity(n),
        ps: Vec::with_capacity(n),
        fdr_ps: Vec::new(),
        fdr_rejected: Vec::new(),
        stars: Vec::with_capacity(n),
    };

    for region in regions {
        let region = region.as_ref();
        let values = df.column_values(region)?;
        if values.is_empty() {
            return Err(StatsError::EmptyColumn(region.to_string()));
        }

        // A single observation has no spread: NaN statistics, left out of the FDR family
        let (mean, std_dev, t, p) = if values.len() == 1 {
            (values[0], f64::NAN, f64::NAN, f64::NAN)
        } else {
            let test = one_sample_ttest(&values, config.popmean)?;
            (test.mean, test.std_dev, test.t, test.p)
        };
        tracing::debug!(region, n = values.len(), t, p, "regional t-test");

        result.regions.push(region.to_string());
        result.means.push(mean);
        result.stds.push(std_dev);
        result.ts.push(t);
        result.ps.push(p);
        result.stars.push(Significance::from_p(p));
    }

    let fdr = fdr_correction(&result.ps, config.fdr_alpha);
    result.fdr_ps = fdr.adjusted;
    result.fdr_rejected = fdr.rejected;

    Ok(result)
}
