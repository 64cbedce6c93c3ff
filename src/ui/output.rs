//! Output formatting for the `summary` command

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use std::fmt::Write;

use crate::analysis::{Analysis, Summary};
use crate::core::constants::{charts, output_formats};
use crate::core::error::{DashboardError, Result};
use crate::core::types::format_number;
use crate::data::PlaylistTable;
use crate::ui::color::{Colors, colorize};

/// Every analysis summary for one dataset
#[derive(Debug, Serialize)]
pub struct SummaryReport {
    pub source: String,
    pub rows: usize,
    #[serde(serialize_with = "serialize_by_slug")]
    pub analyses: Vec<(Analysis, Summary)>,
}

impl SummaryReport {
    pub fn from_table(table: &PlaylistTable, source: &str) -> Self {
        Self {
            source: source.to_string(),
            rows: table.len(),
            analyses: Analysis::ALL
                .iter()
                .map(|&analysis| (analysis, analysis.summarize(table)))
                .collect(),
        }
    }
}

/// Map keyed by analysis slug, in display order
fn serialize_by_slug<S: Serializer>(
    analyses: &[(Analysis, Summary)],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(analyses.len()))?;
    for (analysis, summary) in analyses {
        map.serialize_entry(analysis.slug(), summary)?;
    }
    map.end()
}

/// Render the report in the requested output format
pub fn format_summary(report: &SummaryReport, format: &str) -> Result<String> {
    match format {
        output_formats::JSON => Ok(serde_json::to_string_pretty(report)?),
        output_formats::TEXT => Ok(format_summary_text(report)),
        other => Err(DashboardError::InvalidArgument(format!(
            "Unknown output format '{other}'. Expected one of: {}.",
            output_formats::ALL.join(", ")
        ))),
    }
}

/// One block per analysis: heading line, then indented entries
pub fn format_summary_text(report: &SummaryReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({} rows)",
        colorize(&report.source, Colors::BOLD),
        report.rows
    );

    for (analysis, summary) in &report.analyses {
        let _ = writeln!(
            out,
            "\n{} {}",
            colorize(analysis.heading(), Colors::BRIGHT_GREEN),
            colorize(&format!("[{}]", analysis.slug()), Colors::DIM)
        );
        if summary.is_empty() {
            let _ = writeln!(out, "  (no data)");
            continue;
        }
        write_summary_lines(&mut out, summary);
    }

    out
}

fn write_summary_lines(out: &mut String, summary: &Summary) {
    match summary {
        Summary::Ranking(groups) => {
            let width = groups.iter().map(|g| g.name.chars().count()).max().unwrap_or(0);
            for (rank, group) in groups.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "  {:>2}. {:<width$}  {}",
                    rank + 1,
                    group.name,
                    format_number(group.value)
                );
            }
        }
        Summary::Monthly(months) => {
            for month in months {
                let _ = writeln!(out, "  {}  {}", month.month.format("%Y-%m"), month.count);
            }
        }
        Summary::Yearly(years) => {
            for year in years {
                let _ = writeln!(out, "  {}  {}", year.year, format_number(year.mean));
            }
        }
        Summary::Scatter(points) => {
            let (x_min, x_max) = extent(points.iter().map(|p| p.0));
            let (y_min, y_max) = extent(points.iter().map(|p| p.1));
            let _ = writeln!(out, "  {} points", points.len());
            let _ = writeln!(
                out,
                "  x: {} .. {}",
                format_number(x_min),
                format_number(x_max)
            );
            let _ = writeln!(
                out,
                "  y: {} .. {}",
                format_number(y_min),
                format_number(y_max)
            );
        }
        Summary::Histogram(histogram) => {
            let _ = writeln!(
                out,
                "  {} bins, {} values",
                histogram.bin_count(),
                histogram.total()
            );
            for (lo, hi, count) in histogram.bins().filter(|&(_, _, count)| count > 0) {
                let _ = writeln!(
                    out,
                    "  [{}, {})  {}",
                    format_number(lo),
                    format_number(hi),
                    count
                );
            }
        }
        Summary::Frequencies(tokens) => {
            let _ = writeln!(out, "  {} distinct", tokens.len());
            for token in tokens.iter().take(charts::TOP_N) {
                let _ = writeln!(out, "  {:>6}  {}", token.count, token.token);
            }
        }
    }
}

fn extent<I: Iterator<Item = f64>>(values: I) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}
