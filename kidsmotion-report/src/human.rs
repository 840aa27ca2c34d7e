//! Terminal Output
//!
//! Plain-text rendering of an [`AnalysisReport`]: the participant summary,
//! the regional t-test table and the correlation lines.

use crate::report::{AnalysisReport, Descriptives};

fn push_descriptives(output: &mut String, label: &str, d: Option<&Descriptives>) {
    match d {
        Some(d) => output.push_str(&format!(
            "  {:<14} mean {:>8.3}  sd {:>8.3}  min {:>8.3}  median {:>8.3}  max {:>8.3}\n",
            label, d.mean, d.std_dev, d.min, d.median, d.max
        )),
        None => output.push_str(&format!("  {:<14} no values\n", label)),
    }
}

/// Format a report for human-readable terminal display
pub fn format_human_output(report: &AnalysisReport) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str("Kidsmotion Analysis\n");
    output.push_str(&"=".repeat(60));
    output.push_str("\n\n");

    if let Some(input) = &report.meta.input {
        output.push_str(&format!("Input: {}\n", input));
    }
    for selection in &report.meta.selection {
        output.push_str(&format!("  {}\n", selection));
    }
    output.push_str(&format!("Subjects: {}\n", report.dataset.subjects));
    push_descriptives(&mut output, "age", report.dataset.age.as_ref());
    push_descriptives(&mut output, "mean FD", report.dataset.mean_fd.as_ref());
    push_descriptives(&mut output, "percent FD", report.dataset.perc_fd.as_ref());

    if let Some(ttest) = &report.ttest {
        output.push_str(&format!(
            "\nRegional t-tests (FDR alpha {})\n",
            ttest.fdr_alpha
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        let width = ttest
            .regions
            .iter()
            .map(|r| r.region.len())
            .max()
            .unwrap_or(6)
            .max(6);

        output.push_str(&format!(
            "  {:<width$}  {:>8}  {:>8}  {:>8}  {:>8}  {:>8}  {:>4}\n",
            "Region",
            "mean",
            "std",
            "t",
            "p",
            "fdr p",
            "",
            width = width
        ));
        output.push_str(&format!("  {}\n", "-".repeat(width + 54)));

        for r in &ttest.regions {
            let marker = if r.fdr_rejected { " (fdr)" } else { "" };
            output.push_str(&format!(
                "  {:<width$}  {:>8.3}  {:>8.3}  {:>8.2}  {:>8.4}  {:>8.4}  {:>4}{}\n",
                r.region,
                r.mean,
                r.std,
                r.t,
                r.p,
                r.fdr_p,
                r.stars,
                marker,
                width = width
            ));
        }

        output.push_str(&format!(
            "\n  {} of {} regions p < .05, {} after FDR correction\n",
            ttest.significant,
            ttest.regions.len(),
            ttest.fdr_significant
        ));
    }

    if !report.correlations.is_empty() {
        output.push_str("\nCorrelations\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for c in &report.correlations {
            let covariate = c
                .covariate
                .as_deref()
                .map(|cov| format!(" controlling for {}", cov))
                .unwrap_or_default();
            output.push_str(&format!("  {} ~ {}{} (n = {})\n", c.x, c.y, covariate, c.n));
            output.push_str(&format!("    {}\n", c.formatted));
        }
    }

    output
}
