//! Correlation and Partial Correlation
//!
//! Pearson correlation with a Student-t p-value, and first-order partial
//! correlation by residualizing both variables on a single covariate.

use crate::error::{Result, StatsError};
use crate::summary::mean;
use crate::ttest::two_sided_p;
use kidsmotion_data::Dataset;

/// Least-squares line `target ≈ slope * covariate + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    /// Change in target per unit of covariate
    pub slope: f64,
    /// Fitted target at covariate zero
    pub intercept: f64,
}

impl LinearFit {
    /// Fitted value at `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Result of a (partial) correlation between two columns
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationResult {
    /// Pearson correlation coefficient
    pub r: f64,
    /// Two-sided p-value
    pub p: f64,
    /// Complete observations used
    pub n: usize,
    /// Covariate partialled out, if any
    pub covariate: Option<String>,
}

pub(crate) fn check_lengths(expected: usize, got: usize) -> Result<()> {
    if expected != got {
        return Err(StatsError::ShapeMismatch { expected, got });
    }
    Ok(())
}

/// Pearson correlation coefficient and two-sided p-value
///
/// Two observations always give `p = 1`. A constant input has no defined
/// correlation and yields NaN for both values.
pub fn pearson(x: &[f64], y: &[f64]) -> Result<(f64, f64)> {
    check_lengths(x.len(), y.len())?;
    if x.len() < 2 {
        return Err(StatsError::InsufficientData {
            needed: 2,
            got: x.len(),
        });
    }

    let (mx, my) = (mean(x), mean(y));
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in x.iter().zip(y) {
        let (dx, dy) = (a - mx, b - my);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return Ok((f64::NAN, f64::NAN));
    }

    let r = (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0);

    let n = x.len();
    if n == 2 {
        return Ok((r, 1.0));
    }
    if r.abs() == 1.0 {
        return Ok((r, 0.0));
    }

    let df = (n - 2) as f64;
    let t = r * (df / ((1.0 - r) * (1.0 + r))).sqrt();
    Ok((r, two_sided_p(t, df)?))
}

/// Ordinary least squares fit with an intercept
///
/// A constant covariate carries no slope information; the fit is then the
/// horizontal line through the target mean.
pub fn linear_fit(covariate: &[f64], target: &[f64]) -> Result<LinearFit> {
    check_lengths(covariate.len(), target.len())?;
    if covariate.is_empty() {
        return Err(StatsError::InsufficientData { needed: 1, got: 0 });
    }

    let (mx, my) = (mean(covariate), mean(target));
    let (mut sxy, mut sxx) = (0.0, 0.0);
    for (x, y) in covariate.iter().zip(target) {
        sxy += (x - mx) * (y - my);
        sxx += (x - mx) * (x - mx);
    }

    let slope = if sxx == 0.0 { 0.0 } else { sxy / sxx };
    Ok(LinearFit {
        slope,
        intercept: my - slope * mx,
    })
}

/// Residuals of `target` after removing its linear dependence on `covariate`
pub fn residualize(covariate: &[f64], target: &[f64]) -> Result<Vec<f64>> {
    let fit = linear_fit(covariate, target)?;
    Ok(covariate
        .iter()
        .zip(target)
        .map(|(&x, &y)| y - fit.predict(x))
        .collect())
}

/// Pearson correlation of `x` and `y` controlling for one covariate
pub fn partial_correlation(x: &[f64], y: &[f64], covariate: &[f64]) -> Result<(f64, f64)> {
    check_lengths(x.len(), y.len())?;
    let x_res = residualize(covariate, x)?;
    let y_res = residualize(covariate, y)?;
    pearson(&x_res, &y_res)
}

/// Rows where every named column is present, one vector per column
pub fn complete_cases(df: &Dataset, columns: &[&str]) -> Result<Vec<Vec<f64>>> {
    let raw = columns
        .iter()
        .map(|c| df.numeric_column(c))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut out = vec![Vec::with_capacity(df.len()); columns.len()];
    for row in 0..df.len() {
        if raw.iter().all(|col| col[row].is_some()) {
            for (dst, col) in out.iter_mut().zip(&raw) {
                dst.extend(col[row]);
            }
        }
    }
    Ok(out)
}

/// Correlate two columns, optionally controlling for one covariate
///
/// Rows with a missing value in any involved column are dropped first.
/// Passing more than one covariate is an error.
pub fn correlate(df: &Dataset, x: &str, y: &str, covariates: &[&str]) -> Result<CorrelationResult> {
    if covariates.len() > 1 {
        return Err(StatsError::UnsupportedCovariate(covariates.len()));
    }

    let covariate = covariates.first().copied();
    let mut columns = vec![x, y];
    columns.extend(covariate);

    let data = complete_cases(df, &columns)?;
    let n = data[0].len();

    let (r, p) = match covariate {
        None => pearson(&data[0], &data[1])?,
        Some(_) => partial_correlation(&data[0], &data[1], &data[2])?,
    };

    tracing::debug!(x, y, ?covariate, n, r, p, "correlation");

    Ok(CorrelationResult {
        r,
        p,
        n,
        covariate: covariate.map(String::from),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use kidsmotion_data::{SchemaConfig, from_reader};

    #[test]
    fn test_pearson_known_value() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 1.0, 4.0, 3.0, 5.0];
        let (r, p) = pearson(&x, &y).unwrap();

        assert!((r - 0.8).abs() < 1e-12);
        // t = 0.8 * sqrt(3 / 0.36) = 2.3094, df = 3
        assert!((p - 0.104).abs() < 1e-3);
    }

    #[test]
    fn test_pearson_perfect_and_constant() {
        let (r, p) = pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
        assert_eq!(p, 0.0);

        let (r, p) = pearson(&[1.0, 1.0, 1.0], &[2.0, 4.0, 6.0]).unwrap();
        assert!(r.is_nan() && p.is_nan());

        let (_, p) = pearson(&[1.0, 2.0], &[3.0, 1.0]).unwrap();
        assert_eq!(p, 1.0);
    }

    #[test]
    fn test_pearson_errors() {
        assert!(matches!(
            pearson(&[1.0, 2.0], &[1.0]),
            Err(StatsError::ShapeMismatch { expected: 2, got: 1 })
        ));
        assert!(matches!(
            pearson(&[1.0], &[1.0]),
            Err(StatsError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_residualize_perfect_line() {
        let covariate: Vec<f64> = (0..10).map(|i| i as f64 * 0.7).collect();
        let target: Vec<f64> = covariate.iter().map(|c| 2.0 * c + 3.0).collect();

        let fit = linear_fit(&covariate, &target).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-10);
        assert!((fit.intercept - 3.0).abs() < 1e-10);

        let residuals = residualize(&covariate, &target).unwrap();
        assert_eq!(residuals.len(), target.len());
        assert!(residuals.iter().all(|r| r.abs() < 1e-10));
    }

    #[test]
    fn test_residualize_shape_mismatch() {
        assert!(matches!(
            residualize(&[1.0, 2.0, 3.0], &[1.0, 2.0]),
            Err(StatsError::ShapeMismatch { expected: 3, got: 2 })
        ));
    }

    #[test]
    fn test_residualize_constant_covariate() {
        let residuals = residualize(&[5.0, 5.0, 5.0], &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(residuals, vec![-1.0, 0.0, 1.0]);
    }

    const TABLE: &str = "\
FILE_ID,AGE_AT_SCAN,func_mean_fd,func_perc_fd,x,y
a,7.0,0.10,1.0,1.0,2.0
b,8.0,0.30,3.0,2.0,1.0
c,9.0,0.20,2.0,3.0,4.0
d,10.0,0.50,6.0,4.0,3.0
e,11.0,0.40,4.0,5.0,5.0
f,12.0,0.45,,6.0,
";

    #[test]
    fn test_correlate_plain_matches_pearson() {
        let df = from_reader(TABLE.as_bytes(), &SchemaConfig::default()).unwrap();
        let result = correlate(&df, "x", "y", &[]).unwrap();

        let (r, p) = pearson(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.0, 1.0, 4.0, 3.0, 5.0]).unwrap();
        assert_eq!(result.n, 5);
        assert!((result.r - r).abs() < 1e-12);
        assert!((result.p - p).abs() < 1e-12);
        assert!(result.covariate.is_none());
    }

    #[test]
    fn test_correlate_with_covariate_matches_residuals() {
        let df = from_reader(TABLE.as_bytes(), &SchemaConfig::default()).unwrap();
        let result = correlate(&df, "x", "y", &["func_mean_fd"]).unwrap();

        let fd = [0.10, 0.30, 0.20, 0.50, 0.40];
        let x_res = residualize(&fd, &[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let y_res = residualize(&fd, &[2.0, 1.0, 4.0, 3.0, 5.0]).unwrap();
        let (r, p) = pearson(&x_res, &y_res).unwrap();

        assert_eq!(result.n, 5);
        assert!((result.r - r).abs() < 1e-12);
        assert!((result.p - p).abs() < 1e-12);
        assert_eq!(result.covariate.as_deref(), Some("func_mean_fd"));
    }

    #[test]
    fn test_correlate_drops_incomplete_rows() {
        let df = from_reader(TABLE.as_bytes(), &SchemaConfig::default()).unwrap();
        let result = correlate(&df, "func_mean_fd", "func_perc_fd", &["AGE_AT_SCAN"]).unwrap();
        assert!(result.r.abs() <= 1.0);
        assert_eq!(result.n, 5);
    }

    #[test]
    fn test_correlate_errors() {
        let df = from_reader(TABLE.as_bytes(), &SchemaConfig::default()).unwrap();

        assert!(matches!(
            correlate(&df, "x", "y", &["AGE_AT_SCAN", "func_mean_fd"]),
            Err(StatsError::UnsupportedCovariate(2))
        ));
        assert!(matches!(
            correlate(&df, "x", "nope", &[]),
            Err(StatsError::Data(kidsmotion_data::DataError::ColumnNotFound(_)))
        ));
    }
}
