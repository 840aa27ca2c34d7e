//! Integration tests for Kidsmotion
//!
//! These tests run the selection, statistics, plotting and reporting layers
//! together on a small synthetic cohort.

use kidsmotion::{
    Dataset, Group, MotionMeasure, OutputFormat, ResampleConfig, SchemaConfig, Significance,
    clean, compare_groups_boxplots, corr_motion_age, correlate, filter, format_r_p, from_reader,
    histogram_motion, regional_one_sample_ttest, resampled_correlations, sample,
};
use kidsmotion_report::{AnalysisReport, CorrelationEntry, DatasetSummary, ReportMeta};
use rand::SeedableRng;
use rand::rngs::StdRng;

const SUBJECTS: usize = 20;

struct Row {
    id: String,
    age: f64,
    mean_fd: f64,
    perc_fd: Option<f64>,
}

fn rows() -> Vec<Row> {
    (0..SUBJECTS)
        .map(|i| Row {
            id: if i == 3 {
                "no_filename".to_string()
            } else {
                format!("sub-{i:02}")
            },
            age: 5.0 + i as f64 * 0.75,
            mean_fd: 0.05 + (i % 7) as f64 * 0.04,
            perc_fd: (i != 8).then(|| ((i * 13) % 60) as f64),
        })
        .collect()
}

fn cohort() -> Dataset {
    let mut table =
        String::from("FILE_ID,AGE_AT_SCAN,func_mean_fd,func_perc_fd,lh_pos,rh_null,score\n");
    for (i, row) in rows().iter().enumerate() {
        let perc = row.perc_fd.map(|p| p.to_string()).unwrap_or_default();
        table.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            row.id,
            row.age,
            row.mean_fd,
            perc,
            1.0 + (i % 4) as f64 * 0.25,
            if i % 2 == 0 { 1.0 } else { -1.0 },
            2.0 * row.age + (i % 3) as f64 * 0.1,
        ));
    }
    from_reader(table.as_bytes(), &SchemaConfig::default()).unwrap()
}

/// Test that clean and filter keep exactly the subjects the rules describe
#[test]
fn test_clean_then_filter_counts() {
    let raw = cohort();
    assert_eq!(raw.len(), SUBJECTS);

    let cleaned = clean(&raw);
    let expected_clean = rows()
        .iter()
        .filter(|r| r.perc_fd.is_some() && r.id != "no_filename")
        .filter(|r| (6..=18).contains(&(r.age.floor() as i32)))
        .count();
    assert_eq!(cleaned.len(), expected_clean);
    assert!(cleaned.has_age_years());

    let filtered = filter(&cleaned, 20.0, 8, 16, &MotionMeasure::PercentFd).unwrap();
    let expected_filter = rows()
        .iter()
        .filter(|r| r.id != "no_filename")
        .filter(|r| r.perc_fd.is_some_and(|p| p < 20.0))
        .filter(|r| (8..=16).contains(&(r.age.floor() as i32)))
        .count();
    assert_eq!(filtered.len(), expected_filter);
    assert!(filtered.len() < cleaned.len());

    // Mean FD as the measure uses a different column
    let by_mean = filter(&cleaned, 0.1, 6, 18, &MotionMeasure::MeanFd).unwrap();
    assert!(by_mean.iter().all(|s| s.mean_fd.unwrap() < 0.1));
}

/// Test that filtering before cleaning is rejected
#[test]
fn test_filter_requires_age_years() {
    let raw = cohort();
    assert!(filter(&raw, 50.0, 6, 18, &MotionMeasure::PercentFd).is_err());
}

/// Test seeded sampling reproducibility
#[test]
fn test_seeded_sample() {
    let cleaned = clean(&cohort());
    let ids = |df: &Dataset| {
        let mut ids: Vec<String> = df.iter().map(|s| s.id.clone()).collect();
        ids.sort();
        ids
    };

    let a = sample(&cleaned, 5, &mut StdRng::seed_from_u64(11));
    let b = sample(&cleaned, 5, &mut StdRng::seed_from_u64(11));
    assert_eq!(a.len(), 5);
    assert_eq!(ids(&a), ids(&b));

    let all = sample(&cleaned, cleaned.len() + 10, &mut StdRng::seed_from_u64(1));
    assert_eq!(ids(&all), ids(&cleaned));
}

/// Test regional t-tests with one real effect and one null region
#[test]
fn test_regional_ttest() {
    let df = clean(&cohort());
    let result = regional_one_sample_ttest(&df, &["lh_pos", "rh_null"]).unwrap();

    assert_eq!(result.len(), 2);
    assert_eq!(result.regions, vec!["lh_pos", "rh_null"]);

    let pos = result.get("lh_pos").unwrap();
    assert!(pos.t > 10.0);
    assert_eq!(pos.stars, Significance::P001);
    assert!(pos.fdr_rejected);
    assert!(pos.fdr_p >= pos.p);

    let null = result.get("rh_null").unwrap();
    assert_eq!(null.stars, Significance::NotSignificant);
    assert!(!null.fdr_rejected);
}

/// Test correlation end to end, including the formatted output
#[test]
fn test_correlation_and_formatting() {
    let df = clean(&cohort());

    let result = correlate(&df, "AGE_AT_SCAN", "score", &[]).unwrap();
    assert_eq!(result.n, df.len());
    assert!(result.r > 0.99);
    assert!(result.p < 0.001);

    let (r, p) = format_r_p(result.r, result.p, 2);
    assert_eq!(r, "= 1.00");
    assert_eq!(p, "< .001");

    let partial = correlate(&df, "AGE_AT_SCAN", "score", &["func_mean_fd"]).unwrap();
    assert_eq!(partial.covariate.as_deref(), Some("func_mean_fd"));
    assert!(partial.r > 0.99);
}

/// Test that the figures render and describe their panels
#[test]
fn test_figures_render() {
    let df = clean(&cohort());

    let histogram = histogram_motion(&df).unwrap();
    assert!(histogram.svg().contains("<svg"));
    assert_eq!(histogram.axes().len(), 3);

    let scatter = corr_motion_age(&df, true).unwrap();
    assert_eq!(scatter.axes().len(), 2);
    for axes in scatter.axes() {
        assert!(axes.x_range.min < 6.0 && axes.x_range.max > 18.0);
    }
}

/// Test resampled correlations feeding the group box plots
#[test]
fn test_compare_selections() {
    let cleaned = clean(&cohort());
    let config = ResampleConfig {
        sample_size: 6,
        iterations: 40,
        seed: 5,
    };

    let mut groups = Vec::new();
    for threshold in [100.0, 30.0] {
        let df = filter(&cleaned, threshold, 6, 18, &MotionMeasure::PercentFd).unwrap();
        let x = df.column_values("AGE_AT_SCAN").unwrap();
        let y = df.column_values("score").unwrap();

        let rs = resampled_correlations(&x, &y, &config).unwrap();
        assert_eq!(rs.len(), 40);
        assert_eq!(rs, resampled_correlations(&x, &y, &config).unwrap());
        groups.push(Group::new(format!("< {threshold}"), rs));
    }

    let figure = compare_groups_boxplots(&groups, Some("age ~ score")).unwrap();
    assert!(figure.svg().contains("age ~ score"));
    assert!(figure.axes()[0].y_range.contains(0.0));
}

/// Test rendering a report in every format
#[test]
fn test_report_formats() {
    let df = clean(&cohort());
    let result = correlate(&df, "AGE_AT_SCAN", "score", &[]).unwrap();

    let mut report = AnalysisReport::new(
        ReportMeta::now(Some("cohort.csv".to_string())),
        DatasetSummary::from_columns(
            df.len(),
            &df.column_values("AGE_AT_SCAN").unwrap(),
            &df.column_values("func_mean_fd").unwrap(),
            &df.column_values("func_perc_fd").unwrap(),
        ),
    );
    report
        .correlations
        .push(CorrelationEntry::new("AGE_AT_SCAN", "score", &result, 2));

    let human = OutputFormat::Human.render(&report).unwrap();
    assert!(human.contains("AGE_AT_SCAN ~ score"));

    let json = OutputFormat::Json.render(&report).unwrap();
    assert!(json.contains("\"input\": \"cohort.csv\""));

    let csv = OutputFormat::Csv.render(&report).unwrap();
    assert!(csv.lines().count() >= 2);
}
