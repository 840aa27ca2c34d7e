//! False Discovery Rate Correction
//!
//! Benjamini–Hochberg step-up procedure for independent or positively
//! correlated tests.

/// FDR-adjusted p-values and rejection decisions, in input order
#[derive(Debug, Clone, PartialEq)]
pub struct FdrCorrection {
    /// Whether each hypothesis is rejected at the requested alpha
    pub rejected: Vec<bool>,
    /// Adjusted p-values (q-values), clipped to 1
    pub adjusted: Vec<f64>,
}

/// Benjamini–Hochberg correction of a family of p-values
///
/// NaN p-values are left out of the family: their adjusted value is NaN
/// and they are never rejected.
pub fn fdr_correction(pvalues: &[f64], alpha: f64) -> FdrCorrection {
    let mut order: Vec<usize> = (0..pvalues.len())
        .filter(|&i| !pvalues[i].is_nan())
        .collect();
    order.sort_by(|&i, &j| {
        pvalues[i]
            .partial_cmp(&pvalues[j])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(i.cmp(&j))
    });

    let m = order.len() as f64;
    let mut adjusted = vec![f64::NAN; pvalues.len()];
    let mut running_min = 1.0_f64;
    for (rank0, &idx) in order.iter().enumerate().rev() {
        let rank = (rank0 + 1) as f64;
        running_min = running_min.min(pvalues[idx] * m / rank);
        adjusted[idx] = running_min;
    }

    let rejected = adjusted.iter().map(|&q| q <= alpha).collect();

    FdrCorrection { rejected, adjusted }
}
