use chrono::{Datelike, NaiveDate};
use plotters::coord::Shift;
use plotters::prelude::*;
use rustc_hash::FxHashSet;
use std::ops::Range;

use crate::analysis::{
    Analysis, Histogram as BinnedCounts, MonthCount, RankedGroup, Summary, YearMean,
};
use crate::core::constants::charts;
use crate::core::error::{DashboardError, Result};
use crate::render::theme;
use crate::render::wordcloud;

fn chart_err<E: std::fmt::Display>(err: E) -> DashboardError {
    DashboardError::Chart(err.to_string())
}

/// Render one analysis summary as an SVG document.
pub fn render_figure(analysis: Analysis, summary: &Summary) -> Result<String> {
    match summary {
        Summary::Ranking(groups) => render_svg(charts::WIDE_FIGURE, |root| {
            draw_bars(root, analysis, groups)
        }),
        Summary::Monthly(months) => render_svg(charts::WIDE_FIGURE, |root| {
            draw_monthly_line(root, analysis, months)
        }),
        Summary::Yearly(years) => render_svg(charts::WIDE_FIGURE, |root| {
            draw_yearly_line(root, analysis, years)
        }),
        Summary::Scatter(points) => render_svg(charts::STANDARD_FIGURE, |root| {
            draw_scatter(root, analysis, points)
        }),
        Summary::Histogram(histogram) => render_svg(charts::STANDARD_FIGURE, |root| {
            draw_histogram(root, analysis, histogram)
        }),
        Summary::Frequencies(tokens) => wordcloud::render_word_cloud(tokens),
    }
}

type Root<'a> = DrawingArea<SVGBackend<'a>, Shift>;

fn render_svg<F>(size: (u32, u32), draw: F) -> Result<String>
where
    F: FnOnce(&Root<'_>) -> Result<()>,
{
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        root.fill(&theme::FIGURE_BACKGROUND).map_err(chart_err)?;
        draw(&root)?;
        root.present().map_err(chart_err)?;
    }
    Ok(svg)
}

/// Chart frame shared by every cartesian figure.
fn chart_builder<'a, 'b>(
    root: &'a Root<'b>,
    analysis: Analysis,
) -> ChartBuilder<'a, 'static, SVGBackend<'b>> {
    let mut builder = ChartBuilder::on(root);
    builder
        .margin(16)
        .x_label_area_size(56)
        .y_label_area_size(80);
    if let Some(caption) = analysis.caption() {
        builder.caption(caption, (theme::FONT_FAMILY, theme::CAPTION_SIZE, &theme::TEXT));
    }
    builder
}

fn draw_bars(root: &Root<'_>, analysis: Analysis, groups: &[RankedGroup]) -> Result<()> {
    let (x_desc, y_desc) = analysis.axis_labels();
    let bar_count = groups.len().max(1) as i32;
    let y_max = padded_max(groups.iter().map(|g| g.value));
    let labels: Vec<String> = groups
        .iter()
        .map(|g| truncate_label(&g.name, charts::MAX_BAR_LABEL_CHARS))
        .collect();

    let mut chart = chart_builder(root, analysis)
        .build_cartesian_2d((0..bar_count).into_segmented(), 0f64..y_max)
        .map_err(chart_err)?;
    chart
        .plotting_area()
        .fill(&theme::PLOT_BACKGROUND)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(labels.len().max(1))
        .x_desc(x_desc)
        .y_desc(y_desc)
        .axis_style(theme::TEXT)
        .label_style((theme::FONT_FAMILY, theme::TICK_LABEL_SIZE, &theme::TEXT))
        .axis_desc_style((theme::FONT_FAMILY, theme::AXIS_DESC_SIZE, &theme::TEXT))
        .x_label_formatter(&|segment| match segment {
            SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .y_label_formatter(&|y| compact_number(*y))
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(
            groups
                .iter()
                .enumerate()
                .filter(|(_, group)| group.value.is_finite())
                .map(|(i, group)| {
                    let i = i as i32;
                    let mut bar = Rectangle::new(
                        [
                            (SegmentValue::Exact(i), 0.0),
                            (SegmentValue::Exact(i + 1), group.value),
                        ],
                        theme::MARK.filled(),
                    );
                    bar.set_margin(0, 0, 6, 6);
                    bar
                }),
        )
        .map_err(chart_err)?;

    Ok(())
}

fn draw_monthly_line(root: &Root<'_>, analysis: Analysis, months: &[MonthCount]) -> Result<()> {
    let points: Vec<(f64, f64)> = months
        .iter()
        .map(|m| (month_index(m.month), m.count as f64))
        .collect();

    draw_line(root, analysis, &points, &|x: &f64| {
        integral(x)
            .and_then(month_from_index)
            .map(|d| d.format("%Y-%m").to_string())
            .unwrap_or_default()
    })
}

fn draw_yearly_line(root: &Root<'_>, analysis: Analysis, years: &[YearMean]) -> Result<()> {
    let points: Vec<(f64, f64)> = years
        .iter()
        .filter(|y| y.mean.is_finite())
        .map(|y| (y.year as f64, y.mean))
        .collect();

    draw_line(root, analysis, &points, &|x: &f64| {
        integral(x).map(|year| year.to_string()).unwrap_or_default()
    })
}

fn draw_line(
    root: &Root<'_>,
    analysis: Analysis,
    points: &[(f64, f64)],
    x_formatter: &dyn Fn(&f64) -> String,
) -> Result<()> {
    let (x_desc, y_desc) = analysis.axis_labels();
    let x_range = padded_range(points.iter().map(|p| p.0));
    let y_max = padded_max(points.iter().map(|p| p.1));
    let x_labels = if points.is_empty() {
        0
    } else {
        points.len().clamp(2, 12)
    };

    let mut chart = chart_builder(root, analysis)
        .build_cartesian_2d(x_range, 0f64..y_max)
        .map_err(chart_err)?;
    chart
        .plotting_area()
        .fill(&theme::PLOT_BACKGROUND)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(x_labels)
        .x_desc(x_desc)
        .y_desc(y_desc)
        .axis_style(theme::TEXT)
        .label_style((theme::FONT_FAMILY, theme::TICK_LABEL_SIZE, &theme::TEXT))
        .axis_desc_style((theme::FONT_FAMILY, theme::AXIS_DESC_SIZE, &theme::TEXT))
        .x_label_formatter(x_formatter)
        .y_label_formatter(&|y| compact_number(*y))
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(LineSeries::new(
            points.iter().copied(),
            ShapeStyle::from(&theme::MARK).stroke_width(2),
        ))
        .map_err(chart_err)?;

    Ok(())
}

fn draw_scatter(root: &Root<'_>, analysis: Analysis, points: &[(f64, f64)]) -> Result<()> {
    let (x_desc, y_desc) = analysis.axis_labels();
    let x_range = padded_range(points.iter().map(|p| p.0));
    let y_range = padded_range(points.iter().map(|p| p.1));

    let mut chart = chart_builder(root, analysis)
        .build_cartesian_2d(x_range, y_range)
        .map_err(chart_err)?;
    chart
        .plotting_area()
        .fill(&theme::PLOT_BACKGROUND)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .axis_style(theme::TEXT)
        .label_style((theme::FONT_FAMILY, theme::TICK_LABEL_SIZE, &theme::TEXT))
        .axis_desc_style((theme::FONT_FAMILY, theme::AXIS_DESC_SIZE, &theme::TEXT))
        .x_label_formatter(&|x| compact_number(*x))
        .y_label_formatter(&|y| compact_number(*y))
        .draw()
        .map_err(chart_err)?;

    // Playlist-level pairs repeat on every track row; one mark per position is enough.
    let mut seen = FxHashSet::default();
    let unique = points
        .iter()
        .filter(|(x, y)| seen.insert((x.to_bits(), y.to_bits())))
        .copied();

    chart
        .draw_series(unique.map(|point| Circle::new(point, 3, theme::MARK.filled())))
        .map_err(chart_err)?;

    Ok(())
}

fn draw_histogram(root: &Root<'_>, analysis: Analysis, histogram: &BinnedCounts) -> Result<()> {
    let (x_desc, y_desc) = analysis.axis_labels();
    let x_lo = histogram.edges.first().copied().unwrap_or(0.0);
    let x_hi = histogram.edges.last().copied().unwrap_or(1.0);
    let y_max = padded_max(std::iter::once(histogram.max_count() as f64));

    let mut chart = chart_builder(root, analysis)
        .build_cartesian_2d(x_lo..x_hi, 0f64..y_max)
        .map_err(chart_err)?;
    chart
        .plotting_area()
        .fill(&theme::PLOT_BACKGROUND)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .axis_style(theme::TEXT)
        .label_style((theme::FONT_FAMILY, theme::TICK_LABEL_SIZE, &theme::TEXT))
        .axis_desc_style((theme::FONT_FAMILY, theme::AXIS_DESC_SIZE, &theme::TEXT))
        .x_label_formatter(&|x| compact_number(*x))
        .y_label_formatter(&|y| compact_number(*y))
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(
            histogram
                .bins()
                .filter(|&(_, _, count)| count > 0)
                .map(|(lo, hi, count)| {
                    Rectangle::new([(lo, 0.0), (hi, count as f64)], theme::MARK.filled())
                }),
        )
        .map_err(chart_err)?;

    Ok(())
}

/// Upper bound of a zero-based value axis with 10% headroom.
fn padded_max<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    let max = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);
    if max > 0.0 { max * 1.1 } else { 1.0 }
}

/// Observed range with 5% padding; a single value or no values still
/// yields a non-empty range.
fn padded_range<I: IntoIterator<Item = f64>>(values: I) -> Range<f64> {
    let bounds = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        });

    match bounds {
        None => 0.0..1.0,
        Some((lo, hi)) if lo == hi => (lo - 1.0)..(hi + 1.0),
        Some((lo, hi)) => {
            let pad = (hi - lo) * 0.05;
            (lo - pad)..(hi + pad)
        }
    }
}

fn month_index(month: NaiveDate) -> f64 {
    (month.year() as f64) * 12.0 + (month.month0() as f64)
}

fn month_from_index(index: i64) -> Option<NaiveDate> {
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    let month = u32::try_from(index.rem_euclid(12)).ok()? + 1;
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// `Some(n)` when `x` sits on a whole number, so fractional ticks stay blank.
fn integral(x: &f64) -> Option<i64> {
    let rounded = x.round();
    ((x - rounded).abs() < 1e-6).then_some(rounded as i64)
}

/// Short tick label: `1.2M`, `35k`, `12`, `0.5`.
pub fn compact_number(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if abs >= 10_000.0 {
        format!("{:.0}k", value / 1_000.0)
    } else if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        label.to_string()
    } else {
        let mut short: String = label.chars().take(max_chars.saturating_sub(1)).collect();
        short.push('…');
        short
    }
}
