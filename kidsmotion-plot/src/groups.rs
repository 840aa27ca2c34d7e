//! Group Comparison Boxplots
//!
//! One box per group with its observations spread beside it, a dashed
//! reference line at zero and an optional title. Groups are usually the
//! resampled correlation distributions of different selection rules.

use crate::error::{PlotError, Result, render};
use crate::figure::{Axes, Figure, PlotConfig};
use crate::range::{AxisRange, MAX_TICKS, padded_range};
use kidsmotion_stats::Quartiles;
use plotters::prelude::*;

const BOX_HALF_WIDTH: f64 = 0.25;
const SWARM_COLUMNS: usize = 9;
const DASH: f64 = 0.08;

/// A named set of observations drawn as one box
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// Label under the box
    pub name: String,
    /// Observations; non-finite values are skipped
    pub values: Vec<f64>,
}

impl Group {
    /// Create a group
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// Horizontal offsets that spread sorted values across the box width
fn swarm_offsets(n: usize) -> impl Iterator<Item = f64> {
    let step = 2.0 * BOX_HALF_WIDTH / SWARM_COLUMNS as f64;
    (0..n).map(move |i| {
        let column = (i % SWARM_COLUMNS) as f64 - (SWARM_COLUMNS / 2) as f64;
        column * step
    })
}

/// Dash segments along `y` from `x0` to `x1`
fn dashes(x0: f64, x1: f64, y: f64) -> Vec<[(f64, f64); 2]> {
    let mut out = Vec::new();
    let mut x = x0;
    while x < x1 {
        out.push([(x, y), ((x + DASH).min(x1), y)]);
        x += 2.0 * DASH;
    }
    out
}

/// Box and swarm plot of each group with a dashed line at zero
pub fn compare_groups_boxplots(groups: &[Group], title: Option<&str>) -> Result<Figure> {
    compare_groups_boxplots_with(groups, title, &PlotConfig::default())
}

/// [`compare_groups_boxplots`] with explicit rendering options
pub fn compare_groups_boxplots_with(
    groups: &[Group],
    title: Option<&str>,
    config: &PlotConfig,
) -> Result<Figure> {
    if groups.is_empty() {
        return Err(PlotError::NoData("no groups to compare".to_string()));
    }

    let finite: Vec<Vec<f64>> = groups
        .iter()
        .map(|g| {
            let mut v: Vec<f64> = g.values.iter().copied().filter(|v| v.is_finite()).collect();
            v.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            v
        })
        .collect();

    let all: Vec<f64> = finite.iter().flatten().copied().collect();
    let y_range = padded_range(&all, config.pad)?.including(0.0);
    let x_range = AxisRange {
        min: -0.5,
        max: groups.len() as f64 - 0.5,
    };

    let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
    let size = (config.panel_width * 5 / 3, config.panel_height);
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        root.fill(&WHITE).map_err(render)?;

        let mut builder = ChartBuilder::on(&root);
        builder.margin(10).x_label_area_size(35).y_label_area_size(40);
        if let Some(title) = title {
            builder.caption(title, ("sans-serif", 16));
        }
        let mut chart = builder
            .build_cartesian_2d(x_range.as_range(), y_range.as_range())
            .map_err(render)?;

        let label_of = |x: &f64| {
            let i = x.round();
            if (x - i).abs() < 1e-6 && i >= 0.0 {
                names.get(i as usize).map(|s| s.to_string()).unwrap_or_default()
            } else {
                String::new()
            }
        };
        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(groups.len())
            .y_labels(MAX_TICKS)
            .x_label_formatter(&label_of)
            .draw()
            .map_err(render)?;

        for (i, values) in finite.iter().enumerate() {
            let center = i as f64;
            let Some(q) = Quartiles::new(values) else {
                continue;
            };
            let (left, right) = (center - BOX_HALF_WIDTH, center + BOX_HALF_WIDTH);
            let outline = BLACK.stroke_width(2);

            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [(left, q.q1), (right, q.q3)],
                    outline,
                )))
                .map_err(render)?;

            let cap = BOX_HALF_WIDTH / 2.0;
            let segments = [
                vec![(left, q.median), (right, q.median)],
                vec![(center, q.q3), (center, q.upper_whisker)],
                vec![(center, q.q1), (center, q.lower_whisker)],
                vec![(center - cap, q.upper_whisker), (center + cap, q.upper_whisker)],
                vec![(center - cap, q.lower_whisker), (center + cap, q.lower_whisker)],
            ];
            chart
                .draw_series(segments.into_iter().map(|s| PathElement::new(s, outline)))
                .map_err(render)?;

            let color = Palette99::pick(i);
            chart
                .draw_series(
                    values
                        .iter()
                        .zip(swarm_offsets(values.len()))
                        .map(|(&v, dx)| Circle::new((center + dx, v), 2, color.filled())),
                )
                .map_err(render)?;
        }

        chart
            .draw_series(
                dashes(x_range.min, x_range.max, 0.0)
                    .into_iter()
                    .map(|seg| PathElement::new(seg.to_vec(), BLACK.stroke_width(1))),
            )
            .map_err(render)?;

        root.present().map_err(render)?;
    }

    tracing::debug!(groups = groups.len(), "rendered group comparison");

    let axes = Axes {
        title: title.map(String::from),
        x_label: String::new(),
        y_label: String::new(),
        x_range,
        y_range,
    };
    Ok(Figure::new(svg, size, vec![axes]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups() -> Vec<Group> {
        vec![
            Group::new("random", vec![0.10, 0.25, -0.05, 0.18, 0.30, 0.12]),
            Group::new("low motion", vec![0.02, -0.08, 0.05, 0.01, f64::NAN]),
        ]
    }

    #[test]
    fn test_range_includes_zero_line() {
        let figure = compare_groups_boxplots(&groups(), None).unwrap();
        let axes = &figure.axes()[0];

        assert!(axes.y_range.contains(0.0));
        assert!(axes.y_range.contains(0.30) && axes.y_range.contains(-0.08));
        assert_eq!((axes.x_range.min, axes.x_range.max), (-0.5, 1.5));

        let positive = vec![Group::new("only", vec![0.4, 0.5, 0.6])];
        let figure = compare_groups_boxplots(&positive, None).unwrap();
        assert_eq!(figure.axes()[0].y_range.min, 0.0);
    }

    #[test]
    fn test_title_is_rendered() {
        let figure = compare_groups_boxplots(&groups(), Some("age vs thickness")).unwrap();
        assert_eq!(figure.axes()[0].title.as_deref(), Some("age vs thickness"));
        assert!(figure.svg().contains("age vs thickness"));
    }

    #[test]
    fn test_no_groups() {
        assert!(matches!(
            compare_groups_boxplots(&[], None),
            Err(PlotError::NoData(_))
        ));
        let empty = vec![Group::new("empty", vec![f64::NAN])];
        assert!(matches!(
            compare_groups_boxplots(&empty, None),
            Err(PlotError::NoData(_))
        ));
    }

    #[test]
    fn test_dashes_span_line() {
        let segs = dashes(-0.5, 0.5, 0.0);
        assert_eq!(segs.first().unwrap()[0], (-0.5, 0.0));
        assert!(segs.iter().all(|s| s[1].0 <= 0.5 && s[0].1 == 0.0));
    }

    #[test]
    fn test_swarm_offsets_stay_inside_box() {
        assert!(swarm_offsets(40).all(|dx| dx.abs() <= BOX_HALF_WIDTH));
    }
}
