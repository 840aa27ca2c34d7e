//! Motion Distribution Figures
//!
//! Histograms of the two framewise displacement summaries, their joint
//! scatter, and their relationship with age at scan.

use crate::error::{Result, render};
use crate::figure::{Axes, Figure, PlotConfig};
use crate::range::{AxisRange, MAX_TICKS, padded_range};
use kidsmotion_data::Dataset;
use kidsmotion_stats::{Quartiles, complete_cases, linear_fit};
use plotters::coord::Shift;
use plotters::prelude::*;

const MAX_BINS: usize = 50;

/// Histogram bin as `(lower edge, upper edge, count)`
type Bin = (f64, f64, f64);

/// Equal-width bins using the Freedman–Diaconis width
///
/// Falls back to `sqrt(n)` bins when the interquartile range is zero.
fn histogram_bins(values: &[f64]) -> Vec<Bin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let Some(quartiles) = Quartiles::new(&finite) else {
        return Vec::new();
    };

    let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    if span == 0.0 {
        return vec![(min - 0.5, max + 0.5, finite.len() as f64)];
    }

    let n = finite.len() as f64;
    let width = 2.0 * quartiles.iqr() / n.cbrt();
    let count = if width > 0.0 {
        (span / width).ceil() as usize
    } else {
        n.sqrt().ceil() as usize
    }
    .clamp(1, MAX_BINS);

    let width = span / count as f64;
    let mut counts = vec![0.0; count];
    for v in &finite {
        let idx = (((v - min) / width).floor() as usize).min(count - 1);
        counts[idx] += 1.0;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, c)| {
            let lo = min + i as f64 * width;
            (lo, lo + width, c)
        })
        .collect()
}

fn histogram_panel(
    area: &DrawingArea<SVGBackend<'_>, Shift>,
    values: &[f64],
    label: &str,
    pad: f64,
) -> Result<Axes> {
    let x_range = padded_range(values, pad)?;
    let bins = histogram_bins(values);
    let top = bins.iter().map(|b| b.2).fold(1.0, f64::max);
    let y_range = AxisRange {
        min: 0.0,
        max: top * (1.0 + pad),
    };

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(40)
        .build_cartesian_2d(x_range.as_range(), y_range.as_range())
        .map_err(render)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(MAX_TICKS)
        .y_labels(MAX_TICKS)
        .x_desc(label)
        .y_desc("count")
        .draw()
        .map_err(render)?;

    chart
        .draw_series(
            bins.iter()
                .map(|&(lo, hi, c)| Rectangle::new([(lo, 0.0), (hi, c)], BLUE.mix(0.5).filled())),
        )
        .map_err(render)?;

    Ok(Axes {
        title: None,
        x_label: label.to_string(),
        y_label: "count".to_string(),
        x_range,
        y_range,
    })
}

fn scatter_panel(
    area: &DrawingArea<SVGBackend<'_>, Shift>,
    (x, y): (&[f64], &[f64]),
    (x_label, y_label): (&str, &str),
    pad: f64,
    fit_reg: bool,
) -> Result<Axes> {
    let x_range = padded_range(x, pad)?;
    let y_range = padded_range(y, pad)?;

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(40)
        .build_cartesian_2d(x_range.as_range(), y_range.as_range())
        .map_err(render)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(MAX_TICKS)
        .y_labels(MAX_TICKS)
        .x_desc(x_label)
        .y_desc(y_label)
        .draw()
        .map_err(render)?;

    chart
        .draw_series(
            x.iter()
                .zip(y)
                .map(|(&a, &b)| Circle::new((a, b), 2, BLUE.filled())),
        )
        .map_err(render)?;

    if fit_reg {
        let fit = linear_fit(x, y)?;
        let ends = [x_range.min, x_range.max].map(|v| (v, fit.predict(v)));
        chart
            .draw_series(LineSeries::new(ends, BLUE.stroke_width(2)))
            .map_err(render)?;
    }

    Ok(Axes {
        title: None,
        x_label: x_label.to_string(),
        y_label: y_label.to_string(),
        x_range,
        y_range,
    })
}

/// Histograms of mean FD and percent FD plus their scatter
pub fn histogram_motion(df: &Dataset) -> Result<Figure> {
    histogram_motion_with(df, &PlotConfig::default())
}

/// [`histogram_motion`] with explicit rendering options
pub fn histogram_motion_with(df: &Dataset, config: &PlotConfig) -> Result<Figure> {
    let schema = df.schema().config();
    let (mean_name, perc_name) = (
        schema.mean_fd_column.as_str(),
        schema.perc_fd_column.as_str(),
    );

    let mean_fd = df.column_values(mean_name)?;
    let perc_fd = df.column_values(perc_name)?;
    let pairs = complete_cases(df, &[mean_name, perc_name])?;

    let size = (config.panel_width * 3, config.panel_height);
    let mut svg = String::new();
    let axes = {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        root.fill(&WHITE).map_err(render)?;
        let panels = root.split_evenly((1, 3));

        let axes = vec![
            histogram_panel(&panels[0], &mean_fd, mean_name, config.pad)?,
            histogram_panel(&panels[1], &perc_fd, perc_name, config.pad)?,
            scatter_panel(
                &panels[2],
                (&pairs[0], &pairs[1]),
                (mean_name, perc_name),
                config.pad,
                false,
            )?,
        ];
        root.present().map_err(render)?;
        axes
    };

    tracing::debug!(subjects = df.len(), "rendered motion histograms");
    Ok(Figure::new(svg, size, axes))
}

/// Age at scan against each motion measure, with optional regression lines
pub fn corr_motion_age(df: &Dataset, fit_reg: bool) -> Result<Figure> {
    corr_motion_age_with(df, fit_reg, &PlotConfig::default())
}

/// [`corr_motion_age`] with explicit rendering options
pub fn corr_motion_age_with(df: &Dataset, fit_reg: bool, config: &PlotConfig) -> Result<Figure> {
    let schema = df.schema().config();
    let age = schema.age_column.as_str();
    let measures = [schema.mean_fd_column.as_str(), schema.perc_fd_column.as_str()];

    let data = measures
        .iter()
        .map(|m| complete_cases(df, &[age, m]))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let size = (config.panel_width * 2, config.panel_height);
    let mut svg = String::new();
    let axes = {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        root.fill(&WHITE).map_err(render)?;
        let panels = root.split_evenly((1, 2));

        let mut axes = Vec::with_capacity(measures.len());
        for ((panel, measure), columns) in panels.iter().zip(measures).zip(&data) {
            axes.push(scatter_panel(
                panel,
                (&columns[0], &columns[1]),
                (age, measure),
                config.pad,
                fit_reg,
            )?);
        }
        root.present().map_err(render)?;
        axes
    };

    tracing::debug!(subjects = df.len(), fit_reg, "rendered motion against age");
    Ok(Figure::new(svg, size, axes))
}
