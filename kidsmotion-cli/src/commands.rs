//! Subcommand Execution
//!
//! Every analysis subcommand follows the same pipeline: load the table with
//! the configured schema, clean it, apply the motion/age filter (CLI flags
//! over `kidsmotion.toml` values), optionally subsample, then run the
//! analysis and write its report or figure.

use crate::{Cli, Commands, KidsMotionConfig, SelectionArgs};
use anyhow::Context;
use kidsmotion_data::{AGE_YEARS_COLUMN, Dataset, FilterCriteria, clean, load_with, sample};
use kidsmotion_plot::{
    Group, compare_groups_boxplots_with, corr_motion_age_with, histogram_motion_with,
};
use kidsmotion_report::{
    AnalysisReport, CorrelationEntry, DatasetSummary, OutputFormat, ReportMeta, TTestReport,
};
use kidsmotion_stats::{
    ResampleConfig, TTestConfig, complete_cases, compute_percentile, correlate,
    regional_ttest_with, resampled_correlations,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use regex::Regex;
use std::io::Write;
use std::path::Path;

pub(crate) fn dispatch(cli: &Cli, config: &KidsMotionConfig) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Clean { input } => {
            let raw = load_with(input, &config.schema)?;
            let df = clean(&raw);
            tracing::info!(loaded = raw.len(), kept = df.len(), "cleaned table");
            write_table(cli, &df)
        }
        Commands::Filter { input, selection } => {
            let (df, _) = select(input, selection, config)?;
            write_table(cli, &df)
        }
        Commands::Ttest {
            input,
            regions,
            selection,
        } => run_ttest(cli, config, input, regions, selection),
        Commands::Correlate {
            input,
            x,
            y,
            covariate,
            selection,
        } => run_correlate(cli, config, input, (x, y), covariate.as_deref(), selection),
        Commands::Compare {
            input,
            x,
            y,
            thresholds,
            sample_size,
            iterations,
            seed,
            title,
        } => {
            let resample = ResampleConfig {
                sample_size: sample_size.unwrap_or(config.sampling.size),
                iterations: iterations.unwrap_or(config.stats.resample_iterations),
                seed: *seed,
            };
            run_compare(cli, config, input, (x, y), thresholds, &resample, title.as_deref())
        }
        Commands::Plot {
            input,
            out_dir,
            no_fit,
            selection,
        } => {
            let dir = out_dir
                .clone()
                .unwrap_or_else(|| config.output.directory.clone());
            run_plot(config, input, &dir, !no_fit, selection)
        }
        Commands::Init => {
            print!("{}", KidsMotionConfig::default_toml());
            Ok(())
        }
    }
}

/// Filter criteria from `kidsmotion.toml` with CLI overrides applied
fn criteria(selection: &SelectionArgs, config: &KidsMotionConfig) -> FilterCriteria {
    let base = &config.filter;
    FilterCriteria {
        motion_threshold: selection.threshold.unwrap_or(base.motion_threshold),
        age_lower: selection.age_lower.unwrap_or(base.age_lower),
        age_upper: selection.age_upper.unwrap_or(base.age_upper),
        motion_measure: selection
            .measure
            .clone()
            .unwrap_or_else(|| base.motion_measure.clone()),
    }
}

fn rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Load, clean, filter and optionally subsample
///
/// Returns the selected participants and a description of each step.
fn select(
    input: &Path,
    selection: &SelectionArgs,
    config: &KidsMotionConfig,
) -> anyhow::Result<(Dataset, Vec<String>)> {
    let raw = load_with(input, &config.schema)?;
    let mut df = clean(&raw);
    let mut notes = vec![format!("cleaned: {} of {} rows kept", df.len(), raw.len())];

    if !selection.no_filter {
        let criteria = criteria(selection, config);
        df = criteria.apply(&df)?;
        notes.push(format!(
            "{} < {}, age {}-{}: {} subjects",
            criteria.motion_measure,
            criteria.motion_threshold,
            criteria.age_lower,
            criteria.age_upper,
            df.len()
        ));
    }

    if let Some(size) = selection.sample {
        let size = size.unwrap_or(config.sampling.size);
        let mut rng = rng(selection.seed.or(config.sampling.seed));
        df = sample(&df, size, &mut rng);
        notes.push(format!("random sample: {} subjects", df.len()));
    }

    tracing::info!(subjects = df.len(), "selected participants");
    Ok((df, notes))
}

fn output_format(cli: &Cli, config: &KidsMotionConfig) -> anyhow::Result<OutputFormat> {
    match &cli.format {
        Some(format) => format.parse().map_err(anyhow::Error::msg),
        None => Ok(config.output.format),
    }
}

fn write_output(cli: &Cli, output: &str) -> anyhow::Result<()> {
    if let Some(ref path) = cli.output {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("cannot create {}", path.display()))?;
        file.write_all(output.as_bytes())?;
        println!("Report written to: {}", path.display());
    } else {
        print!("{}", output);
    }
    Ok(())
}

fn write_table(cli: &Cli, df: &Dataset) -> anyhow::Result<()> {
    match &cli.output {
        Some(path) => {
            df.write_csv(path)?;
            println!("{} subjects written to: {}", df.len(), path.display());
        }
        None => df.to_csv_writer(std::io::stdout().lock())?,
    }
    Ok(())
}

fn new_report(input: &Path, df: &Dataset, notes: Vec<String>) -> anyhow::Result<AnalysisReport> {
    let schema = df.schema().config();
    let dataset = DatasetSummary::from_columns(
        df.len(),
        &df.column_values(&schema.age_column)?,
        &df.column_values(&schema.mean_fd_column)?,
        &df.column_values(&schema.perc_fd_column)?,
    );

    let mut meta = ReportMeta::now(Some(input.display().to_string()));
    meta.selection = notes;
    Ok(AnalysisReport::new(meta, dataset))
}

fn emit_report(cli: &Cli, config: &KidsMotionConfig, report: &AnalysisReport) -> anyhow::Result<()> {
    let format = output_format(cli, config)?;
    let output = format.render(report)?;
    write_output(cli, &output)
}

/// Region columns: every non-core column whose name matches `pattern`
fn region_columns<'a>(df: &'a Dataset, pattern: &Regex) -> Vec<&'a str> {
    let schema = df.schema().config();
    let core = [
        schema.id_column.as_str(),
        schema.age_column.as_str(),
        schema.mean_fd_column.as_str(),
        schema.perc_fd_column.as_str(),
        AGE_YEARS_COLUMN,
    ];
    df.column_names()
        .into_iter()
        .filter(|c| !core.contains(c) && pattern.is_match(c))
        .collect()
}

/// Fail early, naming the first column missing from the table
fn require_columns(df: &Dataset, columns: &[&str]) -> anyhow::Result<()> {
    match columns.iter().find(|c| !df.has_column(c)) {
        Some(missing) => anyhow::bail!("column '{}' not found in the table", missing),
        None => Ok(()),
    }
}

fn run_ttest(
    cli: &Cli,
    config: &KidsMotionConfig,
    input: &Path,
    pattern: &str,
    selection: &SelectionArgs,
) -> anyhow::Result<()> {
    let (df, notes) = select(input, selection, config)?;

    let re = Regex::new(pattern).with_context(|| format!("invalid --regions pattern '{pattern}'"))?;
    let regions = region_columns(&df, &re);
    if regions.is_empty() {
        anyhow::bail!("no columns match --regions '{}'", pattern);
    }
    tracing::info!(regions = regions.len(), "running regional t-tests");

    let ttest_config = TTestConfig {
        fdr_alpha: config.stats.fdr_alpha,
        ..Default::default()
    };
    let result = regional_ttest_with(&df, &regions, &ttest_config)?;

    let mut report = new_report(input, &df, notes)?;
    report.ttest = Some(TTestReport::new(&result, config.stats.fdr_alpha));
    emit_report(cli, config, &report)
}

fn run_correlate(
    cli: &Cli,
    config: &KidsMotionConfig,
    input: &Path,
    (x, y): (&str, &str),
    covariate: Option<&str>,
    selection: &SelectionArgs,
) -> anyhow::Result<()> {
    let (df, notes) = select(input, selection, config)?;

    let covariates: Vec<&str> = covariate.into_iter().collect();
    let mut columns = vec![x, y];
    columns.extend(&covariates);
    require_columns(&df, &columns)?;
    let result = correlate(&df, x, y, &covariates)?;

    let mut report = new_report(input, &df, notes)?;
    report
        .correlations
        .push(CorrelationEntry::new(x, y, &result, config.stats.r_decimals));
    emit_report(cli, config, &report)
}

fn run_compare(
    cli: &Cli,
    config: &KidsMotionConfig,
    input: &Path,
    (x, y): (&str, &str),
    thresholds: &[f64],
    resample: &ResampleConfig,
    title: Option<&str>,
) -> anyhow::Result<()> {
    let cleaned = clean(&load_with(input, &config.schema)?);
    require_columns(&cleaned, &[x, y])?;
    let base = criteria(&SelectionArgs::default(), config);

    let mut groups = Vec::with_capacity(thresholds.len());
    let mut summary = String::new();
    for &threshold in thresholds {
        let criteria = FilterCriteria {
            motion_threshold: threshold,
            ..base.clone()
        };
        let df = criteria.apply(&cleaned)?;
        let data = complete_cases(&df, &[x, y])?;

        let rs = resampled_correlations(&data[0], &data[1], resample).with_context(|| {
            format!(
                "motion < {}: {} complete subjects for samples of {}",
                threshold,
                data[0].len(),
                resample.sample_size
            )
        })?;

        let finite: Vec<f64> = rs.iter().copied().filter(|r| r.is_finite()).collect();
        summary.push_str(&format!(
            "  motion < {:<8} n = {:<5} median r = {:.prec$}\n",
            threshold,
            df.len(),
            compute_percentile(&finite, 50.0),
            prec = config.stats.r_decimals
        ));
        groups.push(Group::new(format!("< {}", threshold), rs));
    }

    let figure = compare_groups_boxplots_with(&groups, title, &config.plot)?;
    let path = cli
        .output
        .clone()
        .unwrap_or_else(|| config.output.directory.join("compare_groups.svg"));
    ensure_parent(&path)?;
    figure.save(&path)?;

    print!("{}", summary);
    println!("Figure written to: {}", path.display());
    Ok(())
}

fn run_plot(
    config: &KidsMotionConfig,
    input: &Path,
    dir: &Path,
    fit_reg: bool,
    selection: &SelectionArgs,
) -> anyhow::Result<()> {
    let (df, _) = select(input, selection, config)?;
    std::fs::create_dir_all(dir).with_context(|| format!("cannot create {}", dir.display()))?;

    let histogram = dir.join("histogram_motion.svg");
    histogram_motion_with(&df, &config.plot)?.save(&histogram)?;
    println!("Figure written to: {}", histogram.display());

    let age = dir.join("corr_motion_age.svg");
    corr_motion_age_with(&df, fit_reg, &config.plot)?.save(&age)?;
    println!("Figure written to: {}", age.display());

    Ok(())
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("cannot create {}", parent.display()))?;
            Ok(())
        }
        _ => Ok(()),
    }
}
