//! Inclusion Filters
//!
//! `clean` applies the fixed study inclusion rules; `filter` applies the
//! per-analysis motion threshold and age window. Both return a new
//! [`Dataset`] and leave the input untouched.

use crate::dataset::{Dataset, Subject};
use crate::error::{DataError, Result};
use crate::schema::{AGE_YEARS_COLUMN, MotionMeasure};
use serde::{Deserialize, Serialize};

/// Apply the study inclusion rules and derive `AGE_YRS`
///
/// Drops subjects without a primary motion measure, subjects whose
/// identifier is the "no file" sentinel, and subjects whose whole-year age
/// falls outside the configured bounds (6 to 18 by default, inclusive).
pub fn clean(df: &Dataset) -> Dataset {
    let config = df.schema().config();
    let (lower, upper) = (config.clean_age_lower, config.clean_age_upper);

    let subjects: Vec<Subject> = df
        .iter()
        .filter(|s| s.perc_fd.is_some())
        .filter(|s| s.id != config.missing_id_sentinel)
        .filter_map(|s| {
            let years = s.age_at_scan?.floor() as i32;
            (lower..=upper).contains(&years).then(|| Subject {
                age_years: Some(years),
                ..s.clone()
            })
        })
        .collect();

    tracing::debug!(
        before = df.len(),
        after = subjects.len(),
        age_lower = lower,
        age_upper = upper,
        "cleaned dataset"
    );

    df.with_subjects(subjects).with_age_years()
}

/// Keep subjects below a motion threshold within an inclusive age window
///
/// A subject is kept when `motion < motion_threshold` and
/// `age_lower <= AGE_YRS <= age_upper`. Subjects with a missing motion
/// value are dropped. Requires `AGE_YRS`, so run [`clean`] first.
pub fn filter(
    df: &Dataset,
    motion_threshold: f64,
    age_lower: i32,
    age_upper: i32,
    motion_measure: &MotionMeasure,
) -> Result<Dataset> {
    let column = motion_measure.column_name(df.schema().config());
    let motion = df.numeric_column(column)?;

    if !df.has_age_years() {
        return Err(DataError::ColumnNotFound(AGE_YEARS_COLUMN.to_string()));
    }

    let subjects: Vec<Subject> = df
        .iter()
        .zip(motion)
        .filter(|(_, m)| m.is_some_and(|m| m < motion_threshold))
        .filter(|(s, _)| s.age_years.is_some_and(|y| (age_lower..=age_upper).contains(&y)))
        .map(|(s, _)| s.clone())
        .collect();

    tracing::debug!(
        before = df.len(),
        after = subjects.len(),
        measure = column,
        threshold = motion_threshold,
        age_lower,
        age_upper,
        "filtered dataset"
    );

    Ok(df.with_subjects(subjects))
}

/// Bundled arguments for [`filter`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Keep subjects strictly below this motion value
    #[serde(default = "default_motion_threshold")]
    pub motion_threshold: f64,
    /// Youngest whole-year age kept (inclusive)
    #[serde(default = "default_age_lower")]
    pub age_lower: i32,
    /// Oldest whole-year age kept (inclusive)
    #[serde(default = "default_age_upper")]
    pub age_upper: i32,
    /// Which motion column to threshold
    #[serde(default)]
    pub motion_measure: MotionMeasure,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            motion_threshold: default_motion_threshold(),
            age_lower: default_age_lower(),
            age_upper: default_age_upper(),
            motion_measure: MotionMeasure::default(),
        }
    }
}

fn default_motion_threshold() -> f64 {
    50.0
}
fn default_age_lower() -> i32 {
    6
}
fn default_age_upper() -> i32 {
    18
}

impl FilterCriteria {
    /// Apply these criteria to a cleaned dataset
    pub fn apply(&self, df: &Dataset) -> Result<Dataset> {
        filter(
            df,
            self.motion_threshold,
            self.age_lower,
            self.age_upper,
            &self.motion_measure,
        )
    }
}
