#![warn(missing_docs)]
//! Kidsmotion Report - Analysis Output
//!
//! Generates various output formats:
//! - JSON (machine-readable)
//! - CSV (spreadsheet-compatible t-test and correlation tables)
//! - Human (terminal summary)

mod csv;
mod error;
mod human;
mod json;
mod report;

pub use self::csv::{generate_correlation_csv, generate_csv_report, generate_ttest_csv};
pub use error::ReportError;
pub use human::format_human_output;
pub use json::generate_json_report;
pub use report::{
    AnalysisReport, CorrelationEntry, DatasetSummary, Descriptives, RegionEntry, ReportMeta,
    SCHEMA_VERSION, TTestReport,
};

use serde::{Deserialize, Serialize};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON with full schema
    Json,
    /// CSV for spreadsheets
    Csv,
    /// Human-readable terminal output
    #[default]
    Human,
}

impl OutputFormat {
    /// Render `report` in this format
    pub fn render(self, report: &AnalysisReport) -> Result<String, ReportError> {
        match self {
            OutputFormat::Json => Ok(generate_json_report(report)?),
            OutputFormat::Csv => generate_csv_report(report),
            OutputFormat::Human => Ok(format_human_output(report)),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "human" | "text" => Ok(OutputFormat::Human),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}
