//! Summary Statistics
//!
//! Descriptive statistics over the non-missing values of a column. The
//! standard deviation is the sample estimate (n - 1 denominator), matching
//! the one used by the t-test.

use crate::percentiles::compute_percentile;

/// Descriptive statistics of a sample
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub struct SummaryStatistics {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub median: f64,
    pub max: f64,
}

/// Arithmetic mean; NaN for an empty sample
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return f64::NAN;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Sample standard deviation (n - 1 denominator); NaN below two samples
pub fn std_dev(samples: &[f64]) -> f64 {
    if samples.len() < 2 {
        return f64::NAN;
    }
    let m = mean(samples);
    let variance =
        samples.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (samples.len() - 1) as f64;
    variance.sqrt()
}

/// Compute summary statistics of a sample
pub fn compute_summary(samples: &[f64]) -> SummaryStatistics {
    let min = samples
        .iter()
        .cloned()
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .unwrap_or(f64::NAN);
    let max = samples
        .iter()
        .cloned()
        .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .unwrap_or(f64::NAN);

    SummaryStatistics {
        count: samples.len(),
        mean: mean(samples),
        std_dev: std_dev(samples),
        min,
        median: if samples.is_empty() {
            f64::NAN
        } else {
            compute_percentile(samples, 50.0)
        },
        max,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_summary() {
        let samples = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let summary = compute_summary(&samples);

        assert!((summary.mean - 3.0).abs() < 1e-12);
        assert!((summary.median - 3.0).abs() < 1e-12);
        assert!((summary.std_dev - 2.5f64.sqrt()).abs() < 1e-12);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 5.0);
        assert_eq!(summary.count, 5);
    }

    #[test]
    fn test_std_dev_needs_two_samples() {
        assert!(std_dev(&[4.0]).is_nan());
        assert_eq!(std_dev(&[4.0, 4.0]), 0.0);
    }

    #[test]
    fn test_empty_samples() {
        let summary = compute_summary(&[]);
        assert_eq!(summary.count, 0);
        assert!(summary.mean.is_nan());
        assert!(summary.min.is_nan());
    }
}
