//! Display Formatting for Correlations

use crate::correlation::CorrelationResult;

/// Number of decimals used for r when none is configured
pub const DEFAULT_R_DECIMALS: usize = 2;

/// Format r and p for reporting
///
/// r is rendered as `= {r}` with `decimals` places. p is `< .001` below
/// 0.001, otherwise `= .ddd` with three decimals and the leading zero
/// dropped. A p of exactly 1 keeps its integer digit (`= 1.000`).
///
/// ```
/// use kidsmotion_stats::format_r_p;
///
/// assert_eq!(
///     format_r_p(0.4567, 0.0003, 2),
///     ("= 0.46".to_string(), "< .001".to_string())
/// );
/// ```
pub fn format_r_p(r: f64, p: f64, decimals: usize) -> (String, String) {
    let r_str = format!("= {r:.decimals$}");

    let p_str = if p < 0.001 {
        "< .001".to_string()
    } else {
        let fixed = format!("{p:.3}");
        match fixed.strip_prefix('0') {
            Some(rest) => format!("= {rest}"),
            None => format!("= {fixed}"),
        }
    };

    (r_str, p_str)
}

/// Printable `r = .., p = ..` line for a correlation
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationReport {
    /// Formatted r, including the `= ` prefix
    pub r: String,
    /// Formatted p, including the `= ` or `< ` prefix
    pub p: String,
}

impl CorrelationReport {
    /// Format a raw `(r, p)` pair
    pub fn new(r: f64, p: f64, decimals: usize) -> Self {
        let (r, p) = format_r_p(r, p, decimals);
        Self { r, p }
    }

    /// Format a correlation result
    pub fn from_result(result: &CorrelationResult, decimals: usize) -> Self {
        Self::new(result.r, result.p, decimals)
    }
}

impl std::fmt::Display for CorrelationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "r {}, p {}", self.r, self.p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(r: f64, p: f64, decimals: usize) -> (String, String) {
        format_r_p(r, p, decimals)
    }

    #[test]
    fn test_small_p() {
        assert_eq!(fmt(0.4567, 0.0003, 2), ("= 0.46".into(), "< .001".into()));
        assert_eq!(fmt(0.1, 0.000999, 2).1, "< .001");
    }

    #[test]
    fn test_regular_p() {
        assert_eq!(fmt(-0.1, 0.045, 3), ("= -0.100".into(), "= .045".into()));
        assert_eq!(fmt(0.3, 0.001, 1), ("= 0.3".into(), "= .001".into()));
        assert_eq!(fmt(0.0, 0.5, 0).0, "= 0");
    }

    #[test]
    fn test_p_of_one_keeps_integer_digit() {
        assert_eq!(fmt(0.0, 1.0, 2).1, "= 1.000");
        assert_eq!(fmt(0.0, 0.9996, 2).1, "= 1.000");
    }

    #[test]
    fn test_report_display() {
        let report = CorrelationReport::new(0.4567, 0.0003, 2);
        assert_eq!(report.to_string(), "r = 0.46, p < .001");

        let result = CorrelationResult {
            r: -0.25,
            p: 0.2,
            n: 40,
            covariate: None,
        };
        let report = CorrelationReport::from_result(&result, DEFAULT_R_DECIMALS);
        assert_eq!(report.to_string(), "r = -0.25, p = .200");
    }
}
