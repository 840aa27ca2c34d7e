//! Resampled Correlations
//!
//! Distribution of Pearson r over repeated random subsamples drawn without
//! replacement. Iterations run in parallel with Rayon; each one seeds its
//! own generator from the base seed and its index, so the output does not
//! depend on thread scheduling.

use crate::correlation::{check_lengths, pearson};
use crate::error::{Result, StatsError};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;
use rayon::prelude::*;

/// Default subsample size
pub const DEFAULT_SAMPLE_SIZE: usize = 100;

/// Default number of resampling iterations
pub const DEFAULT_RESAMPLE_ITERATIONS: usize = 1000;

/// Configuration for resampled correlations
#[derive(Debug, Clone)]
pub struct ResampleConfig {
    /// Observations drawn per iteration
    pub sample_size: usize,
    /// Number of subsamples
    pub iterations: usize,
    /// Base seed
    pub seed: u64,
}

impl Default for ResampleConfig {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
            iterations: DEFAULT_RESAMPLE_ITERATIONS,
            seed: 0,
        }
    }
}

/// Pearson r of `x` and `y` over `iterations` random subsamples
///
/// Results are in iteration order. A subsample with constant values
/// contributes NaN.
pub fn resampled_correlations(x: &[f64], y: &[f64], config: &ResampleConfig) -> Result<Vec<f64>> {
    check_lengths(x.len(), y.len())?;
    if config.sample_size < 2 || config.sample_size > x.len() {
        return Err(StatsError::InsufficientData {
            needed: config.sample_size.max(2),
            got: x.len(),
        });
    }

    tracing::debug!(
        n = x.len(),
        sample_size = config.sample_size,
        iterations = config.iterations,
        "resampling correlations"
    );

    (0..config.iterations)
        .into_par_iter()
        .map(|i| {
            let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(i as u64));
            let picks = index::sample(&mut rng, x.len(), config.sample_size);
            let xs: Vec<f64> = picks.iter().map(|j| x[j]).collect();
            let ys: Vec<f64> = picks.iter().map(|j| y[j]).collect();
            pearson(&xs, &ys).map(|(r, _)| r)
        })
        .collect()
}
