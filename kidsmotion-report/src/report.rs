//! Report Data Structures

use chrono::{DateTime, Utc};
use kidsmotion_stats::{
    CorrelationReport, CorrelationResult, RegionRow, RegionalTTest, SummaryStatistics,
    compute_summary,
};
use serde::{Deserialize, Serialize};

/// Current report schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Complete analysis report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub meta: ReportMeta,
    pub dataset: DatasetSummary,
    pub ttest: Option<TTestReport>,
    pub correlations: Vec<CorrelationEntry>,
}

impl AnalysisReport {
    /// Empty report for a dataset
    pub fn new(meta: ReportMeta, dataset: DatasetSummary) -> Self {
        Self {
            meta,
            dataset,
            ttest: None,
            correlations: Vec::new(),
        }
    }
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    pub schema_version: u32,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    /// Table the analysis was run on
    pub input: Option<String>,
    /// Selection steps applied before the analysis, in order
    pub selection: Vec<String>,
}

impl ReportMeta {
    /// Metadata stamped with the current time
    pub fn now(input: Option<String>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            input,
            selection: Vec::new(),
        }
    }
}

/// Participant count and motion summaries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub subjects: usize,
    pub age: Option<Descriptives>,
    pub mean_fd: Option<Descriptives>,
    pub perc_fd: Option<Descriptives>,
}

impl DatasetSummary {
    /// Summarize the non-missing values of each column
    pub fn from_columns(subjects: usize, age: &[f64], mean_fd: &[f64], perc_fd: &[f64]) -> Self {
        let describe = |values: &[f64]| {
            (!values.is_empty()).then(|| Descriptives::from(&compute_summary(values)))
        };
        Self {
            subjects,
            age: describe(age),
            mean_fd: describe(mean_fd),
            perc_fd: describe(perc_fd),
        }
    }
}

/// Descriptive statistics of one column
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Descriptives {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub median: f64,
    pub max: f64,
}

impl From<&SummaryStatistics> for Descriptives {
    fn from(stats: &SummaryStatistics) -> Self {
        Self {
            count: stats.count,
            mean: stats.mean,
            std_dev: stats.std_dev,
            min: stats.min,
            median: stats.median,
            max: stats.max,
        }
    }
}

/// Regional t-test table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TTestReport {
    pub fdr_alpha: f64,
    pub regions: Vec<RegionEntry>,
    /// Regions with uncorrected p < 0.05
    pub significant: usize,
    /// Regions rejected after FDR correction
    pub fdr_significant: usize,
}

impl TTestReport {
    /// Tabulate regional results
    pub fn new(result: &RegionalTTest, fdr_alpha: f64) -> Self {
        let regions: Vec<RegionEntry> = result.rows().map(RegionEntry::from).collect();
        let significant = regions.iter().filter(|r| r.stars != "ns").count();
        let fdr_significant = regions.iter().filter(|r| r.fdr_rejected).count();
        Self {
            fdr_alpha,
            regions,
            significant,
            fdr_significant,
        }
    }
}

/// One region's row in the t-test table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionEntry {
    pub region: String,
    pub mean: f64,
    pub std: f64,
    pub t: f64,
    pub p: f64,
    pub fdr_p: f64,
    pub fdr_rejected: bool,
    pub stars: String,
}

impl From<RegionRow<'_>> for RegionEntry {
    fn from(row: RegionRow<'_>) -> Self {
        Self {
            region: row.region.to_string(),
            mean: row.mean,
            std: row.std,
            t: row.t,
            p: row.p,
            fdr_p: row.fdr_p,
            fdr_rejected: row.fdr_rejected,
            stars: row.stars.to_string(),
        }
    }
}

/// A reported correlation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationEntry {
    pub x: String,
    pub y: String,
    pub covariate: Option<String>,
    pub n: usize,
    pub r: f64,
    pub p: f64,
    /// `r = .., p = ..` display line
    pub formatted: String,
}

impl CorrelationEntry {
    /// Record a correlation of `x` with `y`, formatting r to `decimals` places
    pub fn new(x: &str, y: &str, result: &CorrelationResult, decimals: usize) -> Self {
        Self {
            x: x.to_string(),
            y: y.to_string(),
            covariate: result.covariate.clone(),
            n: result.n,
            r: result.r,
            p: result.p,
            formatted: CorrelationReport::from_result(result, decimals).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kidsmotion_stats::Significance;

    fn ttest() -> RegionalTTest {
        RegionalTTest {
            regions: vec!["lh_a".into(), "rh_b".into(), "lh_c".into()],
            means: vec![0.5, -0.1, 0.02],
            stds: vec![0.2, 0.3, 0.4],
            ts: vec![7.9, -1.2, 0.1],
            ps: vec![0.0002, 0.04, 0.9],
            fdr_ps: vec![0.0006, 0.06, 0.9],
            fdr_rejected: vec![true, false, false],
            stars: vec![
                Significance::P001,
                Significance::P05,
                Significance::NotSignificant,
            ],
        }
    }

    #[test]
    fn test_ttest_report_counts() {
        let report = TTestReport::new(&ttest(), 0.05);

        assert_eq!(report.regions.len(), 3);
        assert_eq!(report.regions[1].region, "rh_b");
        assert_eq!(report.regions[0].stars, "***");
        assert_eq!(report.significant, 2);
        assert_eq!(report.fdr_significant, 1);
    }

    #[test]
    fn test_correlation_entry_formatting() {
        let result = CorrelationResult {
            r: 0.4567,
            p: 0.0003,
            n: 80,
            covariate: Some("func_mean_fd".into()),
        };
        let entry = CorrelationEntry::new("AGE_AT_SCAN", "lh_a", &result, 2);

        assert_eq!(entry.formatted, "r = 0.46, p < .001");
        assert_eq!(entry.covariate.as_deref(), Some("func_mean_fd"));
        assert_eq!(entry.n, 80);
    }

    #[test]
    fn test_descriptives_from_summary() {
        let stats = compute_summary(&[1.0, 2.0, 3.0]);
        let d = Descriptives::from(&stats);
        assert_eq!(d.count, 3);
        assert_eq!(d.median, 2.0);
        assert_eq!((d.min, d.max), (1.0, 3.0));

        let summary = DatasetSummary::from_columns(3, &[7.0, 9.0], &[], &[1.0]);
        assert_eq!(summary.age.unwrap().mean, 8.0);
        assert!(summary.mean_fd.is_none());
        assert_eq!(summary.perc_fd.unwrap().count, 1);
    }
}
