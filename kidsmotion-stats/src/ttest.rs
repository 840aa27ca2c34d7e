//! One-Sample t-Test

use crate::error::{Result, StatsError};
use crate::summary::{mean, std_dev};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Result of a one-sample t-test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TTestResult {
    /// Number of observations
    pub n: usize,
    /// Sample mean
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator)
    pub std_dev: f64,
    /// t statistic
    pub t: f64,
    /// Two-sided p-value
    pub p: f64,
    /// Degrees of freedom (n - 1)
    pub df: f64,
}

/// Test whether the mean of `samples` differs from `popmean`
///
/// Needs at least two observations. A zero-variance sample gives an
/// infinite t (p = 0) unless its mean equals `popmean`, in which case t and
/// p are NaN.
pub fn one_sample_ttest(samples: &[f64], popmean: f64) -> Result<TTestResult> {
    if samples.len() < 2 {
        return Err(StatsError::InsufficientData {
            needed: 2,
            got: samples.len(),
        });
    }

    let n = samples.len();
    let m = mean(samples);
    let sd = std_dev(samples);
    let df = (n - 1) as f64;

    let standard_error = sd / (n as f64).sqrt();
    let t = (m - popmean) / standard_error;
    let p = two_sided_p(t, df)?;

    Ok(TTestResult {
        n,
        mean: m,
        std_dev: sd,
        t,
        p,
        df,
    })
}

/// Two-sided p-value of a t statistic under Student's t with `df` degrees of freedom
pub(crate) fn two_sided_p(t: f64, df: f64) -> Result<f64> {
    if t.is_nan() {
        return Ok(f64::NAN);
    }
    if t.is_infinite() {
        return Ok(0.0);
    }

    let dist =
        StudentsT::new(0.0, 1.0, df).map_err(|e| StatsError::Distribution(e.to_string()))?;
    Ok((2.0 * dist.cdf(-t.abs())).min(1.0))
}
