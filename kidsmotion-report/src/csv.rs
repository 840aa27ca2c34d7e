//! CSV Output

use crate::error::ReportError;
use crate::report::{AnalysisReport, CorrelationEntry, TTestReport};
use serde::Serialize;

fn write_rows<T: Serialize>(rows: &[T]) -> Result<String, ReportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ReportError::Csv(e.into_error().into()))?;
    Ok(String::from_utf8(bytes)?)
}

/// One row per region: `region,mean,std,t,p,fdr_p,fdr_rejected,stars`
pub fn generate_ttest_csv(report: &TTestReport) -> Result<String, ReportError> {
    write_rows(&report.regions)
}

/// One row per correlation
pub fn generate_correlation_csv(entries: &[CorrelationEntry]) -> Result<String, ReportError> {
    write_rows(entries)
}

/// The t-test table followed by the correlation table, separated by a blank line
pub fn generate_csv_report(report: &AnalysisReport) -> Result<String, ReportError> {
    let mut tables = Vec::new();
    if let Some(ttest) = &report.ttest {
        tables.push(generate_ttest_csv(ttest)?);
    }
    if !report.correlations.is_empty() {
        tables.push(generate_correlation_csv(&report.correlations)?);
    }
    Ok(tables.join("\n"))
}
