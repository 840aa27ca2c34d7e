//! JSON Output

use crate::report::AnalysisReport;

/// Generate a prettified JSON report.
///
/// Non-finite statistics (for example the t of a constant region) are
/// written as `null`.
pub fn generate_json_report(report: &AnalysisReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
