//! Configuration loading from kidsmotion.toml
//!
//! Analysis settings can be specified in a `kidsmotion.toml` file next to
//! the data. The configuration is automatically discovered by walking up
//! from the current directory; command-line flags override it.

use kidsmotion_data::{FilterCriteria, SchemaConfig};
use kidsmotion_plot::PlotConfig;
use kidsmotion_report::OutputFormat;
use kidsmotion_stats::{DEFAULT_FDR_ALPHA, DEFAULT_R_DECIMALS, DEFAULT_RESAMPLE_ITERATIONS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name searched for by [`KidsMotionConfig::discover`]
pub const CONFIG_FILE_NAME: &str = "kidsmotion.toml";

/// Kidsmotion configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KidsMotionConfig {
    /// Column names and parsing rules
    #[serde(default)]
    pub schema: SchemaConfig,
    /// Motion threshold and age window
    #[serde(default)]
    pub filter: FilterCriteria,
    /// Random subsampling
    #[serde(default)]
    pub sampling: SamplingConfig,
    /// Statistical settings
    #[serde(default)]
    pub stats: StatsConfig,
    /// Figure rendering
    #[serde(default)]
    pub plot: PlotConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Random subsampling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Subjects drawn per sample
    #[serde(default = "default_sample_size")]
    pub size: usize,
    /// Seed for reproducible draws; entropy-seeded when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            size: default_sample_size(),
            seed: None,
        }
    }
}

fn default_sample_size() -> usize {
    kidsmotion_stats::DEFAULT_SAMPLE_SIZE
}

/// Statistical configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    /// False discovery rate for regional t-tests
    #[serde(default = "default_fdr_alpha")]
    pub fdr_alpha: f64,
    /// Decimal places used when reporting r
    #[serde(default = "default_r_decimals")]
    pub r_decimals: usize,
    /// Subsamples drawn per group in `compare`
    #[serde(default = "default_resample_iterations")]
    pub resample_iterations: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            fdr_alpha: default_fdr_alpha(),
            r_decimals: default_r_decimals(),
            resample_iterations: default_resample_iterations(),
        }
    }
}

fn default_fdr_alpha() -> f64 {
    DEFAULT_FDR_ALPHA
}
fn default_r_decimals() -> usize {
    DEFAULT_R_DECIMALS
}
fn default_resample_iterations() -> usize {
    DEFAULT_RESAMPLE_ITERATIONS
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default report format: "human", "json", "csv"
    #[serde(default)]
    pub format: OutputFormat,
    /// Directory for figures and filtered tables
    #[serde(default = "default_output_dir")]
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            directory: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("kidsmotion-out")
}

impl KidsMotionConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return match Self::load(&config_path) {
                    Ok(config) => {
                        tracing::debug!(path = %config_path.display(), "loaded configuration");
                        Some(config)
                    }
                    Err(e) => {
                        tracing::warn!(path = %config_path.display(), "ignoring configuration: {e}");
                        None
                    }
                };
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r##"# Kidsmotion Configuration

[schema]
# Core column names
id_column = "FILE_ID"
age_column = "AGE_AT_SCAN"
mean_fd_column = "func_mean_fd"
perc_fd_column = "func_perc_fd"
# Identifier meaning "no connectivity file"
missing_id_sentinel = "no_filename"
# Field delimiter
delimiter = ","
# Cell values read as missing
null_tokens = ["", "NA", "N/A", "n/a", "NaN", "nan", "-nan", "NULL", "null", "None", "#N/A"]
# Whole-year age range kept by `clean` (inclusive)
clean_age_lower = 6
clean_age_upper = 18

[filter]
# Keep subjects whose motion is strictly below this value
motion_threshold = 50.0
# Inclusive whole-year age window
age_lower = 6
age_upper = 18
# Motion measure: "percent-fd", "mean-fd", or { column = "name" }
motion_measure = "percent-fd"

[sampling]
# Subjects per random sample
size = 100
# Seed for reproducible samples (uncomment to enable)
# seed = 42

[stats]
# False discovery rate for regional t-tests
fdr_alpha = 0.05
# Decimal places for r
r_decimals = 2
# Subsamples per group when comparing selections
resample_iterations = 1000

[plot]
# Fractional padding around the data
pad = 0.05
# Panel size in pixels
panel_width = 300
panel_height = 300

[output]
# Default report format: human, json, csv
format = "human"
# Directory for figures and filtered tables
directory = "kidsmotion-out"
"##
        .to_string()
    }
}
