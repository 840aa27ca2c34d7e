#![warn(missing_docs)]
//! Kidsmotion CLI Library
//!
//! Command-line driver for the head-motion analyses. Each subcommand loads
//! the phenotypic table, applies the configured inclusion rules and runs
//! one analysis step:
//!
//! - `clean` / `filter` write the selected participants as CSV
//! - `ttest` runs regional one-sample t-tests with FDR correction
//! - `correlate` reports a (partial) correlation
//! - `compare` draws resampled correlations for several motion thresholds
//! - `plot` renders the motion distribution figures
//! - `init` prints a default `kidsmotion.toml`

mod commands;
mod config;

pub use config::*;

use clap::{Args, Parser, Subcommand};
use kidsmotion_data::MotionMeasure;
use std::path::PathBuf;

/// Kidsmotion CLI arguments
#[derive(Parser, Debug)]
#[command(name = "kidsmotion")]
#[command(author, version, about = "Head-motion analysis helpers for developmental imaging")]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to the nearest kidsmotion.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Report format: human, json, csv
    #[arg(long, global = true)]
    pub format: Option<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Participant selection flags shared by the analysis subcommands
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Keep subjects with motion strictly below this value
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Youngest whole-year age kept
    #[arg(long)]
    pub age_lower: Option<i32>,

    /// Oldest whole-year age kept
    #[arg(long)]
    pub age_upper: Option<i32>,

    /// Motion measure: perc, mean, or a column name
    #[arg(long)]
    pub measure: Option<MotionMeasure>,

    /// Only apply the cleaning rules, skip the motion and age filter
    #[arg(long)]
    pub no_filter: bool,

    /// Draw a random sample after filtering (size defaults to the configured one)
    #[arg(long)]
    pub sample: Option<Option<usize>>,

    /// Seed for the random sample
    #[arg(long)]
    pub seed: Option<u64>,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply the inclusion rules and write the cleaned table
    Clean {
        /// Phenotypic table
        input: PathBuf,
    },
    /// Clean, filter and optionally subsample, then write the table
    Filter {
        /// Phenotypic table
        input: PathBuf,
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// One-sample t-test of each region against zero
    Ttest {
        /// Phenotypic table
        input: PathBuf,
        /// Regex selecting region columns
        #[arg(long)]
        regions: String,
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Correlate two columns, optionally controlling for a covariate
    Correlate {
        /// Phenotypic table
        input: PathBuf,
        /// First variable
        x: String,
        /// Second variable
        y: String,
        /// Covariate to partial out
        #[arg(long)]
        covariate: Option<String>,
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Box plots of resampled correlations under several motion thresholds
    Compare {
        /// Phenotypic table
        input: PathBuf,
        /// First variable
        x: String,
        /// Second variable
        y: String,
        /// Motion thresholds, one group each
        #[arg(long, value_delimiter = ',', default_value = "100,50,10,5")]
        thresholds: Vec<f64>,
        /// Subjects per subsample (defaults to the sampling size)
        #[arg(long)]
        sample_size: Option<usize>,
        /// Subsamples per group
        #[arg(long)]
        iterations: Option<usize>,
        /// Base seed for the subsamples
        #[arg(long, default_value = "0")]
        seed: u64,
        /// Figure title
        #[arg(long)]
        title: Option<String>,
    },
    /// Render the motion distribution figures as SVG
    Plot {
        /// Phenotypic table
        input: PathBuf,
        /// Directory for the figures (defaults to the configured output directory)
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Leave out the regression lines in the age figure
        #[arg(long)]
        no_fit: bool,
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Print a default kidsmotion.toml
    Init,
}

/// Run the Kidsmotion CLI with the process arguments.
///
/// # Returns
/// Returns `Ok(())` on success, or an error if something goes wrong.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the Kidsmotion CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    // Initialize logging
    let filter = if cli.verbose {
        "kidsmotion=debug"
    } else {
        "kidsmotion=info"
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    // Explicit --config wins, then kidsmotion.toml discovery
    let config = match &cli.config {
        Some(path) => KidsMotionConfig::load(path)?,
        None => KidsMotionConfig::discover().unwrap_or_default(),
    };

    commands::dispatch(&cli, &config)
}
