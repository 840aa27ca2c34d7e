//! Percentile Computation
//!
//! Linear-interpolation percentiles and the Tukey quartile summary used to
//! draw box plots.

/// Compute a single percentile from samples
///
/// Uses linear interpolation between nearest ranks.
///
/// # Examples
///
/// ```
/// # use kidsmotion_stats::compute_percentile;
/// let samples = vec![1.0, 2.0, 3.0, 4.0, 5.0];
/// assert_eq!(compute_percentile(&samples, 50.0), 3.0);
/// ```
pub fn compute_percentile(samples: &[f64], percentile: f64) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }

    if samples.len() == 1 {
        return samples[0];
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    let p = percentile / 100.0;

    // Linear interpolation between nearest ranks
    let rank = p * (n - 1) as f64;
    let lower_idx = rank.floor() as usize;
    let upper_idx = (lower_idx + 1).min(n - 1);
    let fraction = rank - lower_idx as f64;

    sorted[lower_idx] + fraction * (sorted[upper_idx] - sorted[lower_idx])
}

/// Box-plot summary of a sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quartiles {
    /// 25th percentile
    pub q1: f64,
    /// 50th percentile
    pub median: f64,
    /// 75th percentile
    pub q3: f64,
    /// Smallest observation within `q1 - 1.5 * IQR`
    pub lower_whisker: f64,
    /// Largest observation within `q3 + 1.5 * IQR`
    pub upper_whisker: f64,
}

impl Quartiles {
    /// Quartiles and Tukey whiskers; `None` for an empty sample
    pub fn new(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let q1 = compute_percentile(samples, 25.0);
        let median = compute_percentile(samples, 50.0);
        let q3 = compute_percentile(samples, 75.0);
        let iqr = q3 - q1;
        let (low_fence, high_fence) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

        let lower_whisker = samples
            .iter()
            .copied()
            .filter(|&v| v >= low_fence)
            .fold(f64::INFINITY, f64::min);
        let upper_whisker = samples
            .iter()
            .copied()
            .filter(|&v| v <= high_fence)
            .fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            q1,
            median,
            q3,
            lower_whisker,
            upper_whisker,
        })
    }

    /// Interquartile range
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}
