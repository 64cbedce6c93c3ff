use chrono::Local;
use rayon::prelude::*;
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use std::time::Instant;

use crate::analysis::{Analysis, Summary};
use crate::core::error::Result;
use crate::core::types::{PREVIEW_COLUMNS, PlaylistTrackRecord};
use crate::data::PlaylistTable;
use crate::render::render_figure;
use crate::reporting::logging;
use crate::ui::ProgressReporter;

/// Constants for dashboard styling and layout
mod dashboard_constants {
    use crate::analysis::Analysis;

    /// Page and header title
    pub const TITLE: &str = "Spotify Data Dashboard";
    pub const TITLE_ICON: &str = "🎵";

    /// Report timestamp format
    pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    /// The five chart rows, two charts each, top to bottom
    pub const ROWS: [(&str, [Analysis; 2]); 5] = [
        (
            "Artists",
            [
                Analysis::AvgTrackDurationByArtist,
                Analysis::TopFollowedArtists,
            ],
        ),
        (
            "Timeline",
            [
                Analysis::PlaylistsOverTime,
                Analysis::AvgTrackDurationByYear,
            ],
        ),
        (
            "Playlist Metrics",
            [Analysis::FollowersVsEdits, Analysis::DurationVsTracks],
        ),
        (
            "Distributions",
            [
                Analysis::PlaylistLengthDistribution,
                Analysis::TrackPositionDistribution,
            ],
        ),
        (
            "Word Clouds",
            [Analysis::AlbumNameCloud, Analysis::TrackNameCloud],
        ),
    ];
}

/// One analysis with its summary and rendered figure.
#[derive(Debug, Clone)]
pub struct RenderedChart {
    pub analysis: Analysis,
    pub summary: Summary,
    /// Standalone SVG document
    pub svg: String,
}

/// Data structure containing all information needed for dashboard generation
#[derive(Debug, Clone)]
pub struct DashboardData {
    /// Where the dataset was read from
    pub source: String,
    /// Row count of the whole table, not only the preview
    pub total_rows: usize,
    /// Leading rows shown in the preview table
    pub preview: Vec<PlaylistTrackRecord>,
    /// The ten charts in display order
    pub charts: Vec<RenderedChart>,
    /// Timestamp when the dashboard was generated
    pub timestamp: String,
}

impl DashboardData {
    pub fn chart(&self, analysis: Analysis) -> Option<&RenderedChart> {
        self.charts.iter().find(|c| c.analysis == analysis)
    }
}

/// Compute every analysis and render its figure.
///
/// The table is only read, so the ten charts are built in parallel. The
/// returned charts keep the fixed display order regardless of which
/// finished first.
pub fn build_dashboard(
    table: &PlaylistTable,
    source: &str,
    preview_rows: usize,
    progress: &ProgressReporter,
) -> Result<DashboardData> {
    let started = Instant::now();

    let charts = Analysis::ALL
        .par_iter()
        .map(|&analysis| {
            let chart = render_chart(analysis, table)?;
            progress.chart_done(analysis.slug());
            Ok(chart)
        })
        .collect::<Result<Vec<_>>>()?;

    logging::log_report_complete(charts.len(), started.elapsed().as_millis());

    Ok(DashboardData {
        source: source.to_string(),
        total_rows: table.len(),
        preview: table.head(preview_rows).to_vec(),
        charts,
        timestamp: Local::now()
            .format(dashboard_constants::TIMESTAMP_FORMAT)
            .to_string(),
    })
}

fn render_chart(analysis: Analysis, table: &PlaylistTable) -> Result<RenderedChart> {
    let started = Instant::now();
    let summary = analysis.summarize(table);
    let svg = render_figure(analysis, &summary)?;
    logging::log_chart_rendered(analysis, summary.len(), started.elapsed().as_millis());

    Ok(RenderedChart {
        analysis,
        summary,
        svg,
    })
}

/// Escape text for use inside HTML element content or attribute values
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// HTML dashboard generator for the playlist charts
pub struct HtmlDashboard;

impl HtmlDashboard {
    /// Generate and write an HTML dashboard to the specified path
    pub fn generate_dashboard<P: AsRef<Path>>(data: &DashboardData, output_path: P) -> Result<()> {
        let html_content = Self::generate_html_content(data);
        fs::write(output_path, html_content)?;
        Ok(())
    }

    /// Generate the complete HTML document content
    pub fn generate_html_content(data: &DashboardData) -> String {
        let css_styles = Self::generate_css();
        let body_content = Self::generate_body_content(data);

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{}</title>
    <style>{}</style>
</head>
<body>
    {}
</body>
</html>"#,
            dashboard_constants::TITLE,
            css_styles,
            body_content,
        )
    }

    fn generate_css() -> &'static str {
        r#"
        :root {
            --accent-color: #1db954;
            --bg-color: #0e1117;
            --card-bg: #161b22;
            --border-color: #30363d;
            --text-primary: #fafafa;
            --text-secondary: #9ca3af;
        }

        * { margin: 0; padding: 0; box-sizing: border-box; }

        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background-color: var(--bg-color);
            color: var(--text-primary);
            line-height: 1.6;
        }

        .container {
            max-width: 1600px;
            margin: 0 auto;
            padding: 2rem;
        }

        .header {
            margin-bottom: 2rem;
        }

        .header h1 {
            font-size: 2.5rem;
            font-weight: 700;
        }

        .header p {
            color: var(--text-secondary);
        }

        .preview {
            max-height: 400px;
            overflow: auto;
            border: 1px solid var(--border-color);
            border-radius: 8px;
            margin-bottom: 3rem;
        }

        .preview table {
            border-collapse: collapse;
            width: 100%;
            font-size: 0.85rem;
        }

        .preview th {
            position: sticky;
            top: 0;
            background: var(--card-bg);
            text-align: left;
        }

        .preview th, .preview td {
            padding: 0.25rem 0.75rem;
            border-bottom: 1px solid var(--border-color);
            white-space: nowrap;
        }

        .preview-caption {
            color: var(--text-secondary);
            font-size: 0.875rem;
            margin-bottom: 0.5rem;
        }

        .chart-row {
            margin-bottom: 3rem;
        }

        .row-title {
            font-size: 1.25rem;
            color: var(--accent-color);
            text-transform: uppercase;
            letter-spacing: 0.05em;
            margin-bottom: 1rem;
        }

        .row-grid {
            display: grid;
            grid-template-columns: repeat(2, minmax(0, 1fr));
            gap: 1.5rem;
        }

        .chart-card {
            background: var(--card-bg);
            padding: 1.5rem;
            border-radius: 12px;
            border: 1px solid var(--border-color);
        }

        .chart-title {
            font-size: 1.5rem;
            font-weight: 600;
            margin-bottom: 1rem;
        }

        .chart-card svg {
            width: 100%;
            height: auto;
            display: block;
        }

        .chart-missing {
            color: var(--text-secondary);
            font-style: italic;
        }

        @media (max-width: 900px) {
            .container { padding: 1rem; }
            .row-grid { grid-template-columns: 1fr; }
        }
        "#
    }

    /// Generate the main body content of the dashboard
    fn generate_body_content(data: &DashboardData) -> String {
        let header_section = Self::generate_header_section(&data.timestamp, &data.source);
        let preview_section = Self::generate_preview_section(&data.preview, data.total_rows);
        let rows_section: String = dashboard_constants::ROWS
            .iter()
            .map(|(title, analyses)| Self::generate_chart_row(title, analyses, data))
            .collect();

        format!(
            r#"
            <div class="container">
                {}
                {}
                {}
            </div>
            "#,
            header_section, preview_section, rows_section
        )
    }

    /// Generate the dashboard header section
    fn generate_header_section(timestamp: &str, source: &str) -> String {
        format!(
            r#"
            <div class="header">
                <h1>{} {}</h1>
                <p>Generated on {} from {}</p>
            </div>
            "#,
            dashboard_constants::TITLE_ICON,
            dashboard_constants::TITLE,
            escape_html(timestamp),
            escape_html(source)
        )
    }

    /// Generate the table of leading dataset rows
    fn generate_preview_section(preview: &[PlaylistTrackRecord], total_rows: usize) -> String {
        let header: String = PREVIEW_COLUMNS
            .iter()
            .map(|column| format!("<th>{column}</th>"))
            .collect();

        let rows: String = preview
            .iter()
            .map(|record| {
                let cells: String = record
                    .preview_cells()
                    .iter()
                    .map(|cell| format!("<td>{}</td>", escape_html(cell)))
                    .collect();
                format!("<tr>{cells}</tr>\n")
            })
            .collect();

        format!(
            r#"
            <p class="preview-caption">Showing {} of {} rows</p>
            <div class="preview">
                <table>
                    <thead><tr>{}</tr></thead>
                    <tbody>
{}                    </tbody>
                </table>
            </div>
            "#,
            preview.len(),
            total_rows,
            header,
            rows
        )
    }

    /// Generate one titled row of two chart cards
    fn generate_chart_row(title: &str, analyses: &[Analysis; 2], data: &DashboardData) -> String {
        let cards: String = analyses
            .iter()
            .map(|&analysis| Self::generate_chart_card(analysis, data.chart(analysis)))
            .collect();

        format!(
            r#"
            <section class="chart-row">
                <h2 class="row-title">{}</h2>
                <div class="row-grid">
                    {}
                </div>
            </section>
            "#,
            escape_html(title),
            cards
        )
    }

    /// Generate a single chart card with its inline SVG figure
    fn generate_chart_card(analysis: Analysis, chart: Option<&RenderedChart>) -> String {
        let figure = match chart {
            Some(chart) => strip_xml_declaration(&chart.svg).to_string(),
            None => r#"<p class="chart-missing">Chart unavailable</p>"#.to_string(),
        };

        format!(
            r#"
            <div class="chart-card" id="{}">
                <h3 class="chart-title">{}</h3>
                {}
            </div>
            "#,
            analysis.slug(),
            escape_html(analysis.heading()),
            figure
        )
    }
}

/// Inline SVG must not carry an XML prolog
fn strip_xml_declaration(svg: &str) -> &str {
    let trimmed = svg.trim_start();
    if trimmed.starts_with("<?xml")
        && let Some(end) = trimmed.find("?>")
    {
        return trimmed[end + 2..].trim_start();
    }
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::fixtures::record;
    use tempfile::NamedTempFile;

    fn create_test_table() -> PlaylistTable {
        let mut a = record("A", 100.0);
        a.album_name = "Views".to_string();
        let mut b = record("B", 200.0);
        b.track_name = "<script>alert(1)</script>".to_string();
        let c = record("A", 300.0);
        PlaylistTable::from_records(vec![a, b, c])
    }

    fn create_test_dashboard_data() -> Result<DashboardData> {
        let table = create_test_table();
        build_dashboard(&table, "spotify_data.csv", 1000, &ProgressReporter::new(false))
    }

    #[test]
    fn test_build_dashboard_keeps_display_order() -> Result<()> {
        let data = create_test_dashboard_data()?;

        let order: Vec<Analysis> = data.charts.iter().map(|c| c.analysis).collect();
        assert_eq!(order, Analysis::ALL.to_vec());
        assert!(data.charts.iter().all(|c| c.svg.contains("<svg")));
        assert_eq!(data.total_rows, 3);
        assert_eq!(data.preview.len(), 3);
        Ok(())
    }

    #[test]
    fn test_build_dashboard_limits_preview() -> Result<()> {
        let table = create_test_table();
        let data = build_dashboard(&table, "x.csv", 2, &ProgressReporter::new(false))?;

        assert_eq!(data.preview.len(), 2);
        assert_eq!(data.total_rows, 3);
        Ok(())
    }

    #[test]
    fn test_build_dashboard_summaries_match_analyses() -> Result<()> {
        let data = create_test_dashboard_data()?;
        let chart = data
            .chart(Analysis::AvgTrackDurationByArtist)
            .map(|c| c.summary.clone());

        match chart {
            Some(Summary::Ranking(groups)) => {
                assert_eq!(groups[0].name, "A");
                assert_eq!(groups[0].value, 200.0);
                assert_eq!(groups[1].name, "B");
            }
            other => panic!("unexpected summary: {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_build_dashboard_empty_table() -> Result<()> {
        let table = PlaylistTable::from_records(Vec::new());
        let data = build_dashboard(&table, "empty.csv", 1000, &ProgressReporter::new(false))?;

        assert_eq!(data.charts.len(), 10);
        assert!(data.preview.is_empty());
        Ok(())
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("plain"), "plain");
        assert!(matches!(escape_html("plain"), Cow::Borrowed(_)));
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_strip_xml_declaration() {
        assert_eq!(
            strip_xml_declaration("<?xml version=\"1.0\"?>\n<svg></svg>"),
            "<svg></svg>"
        );
        assert_eq!(strip_xml_declaration("  <svg></svg>"), "<svg></svg>");
    }

    #[test]
    fn test_generate_header_section() {
        let header = HtmlDashboard::generate_header_section("2025-01-01 12:00:00", "a&b.csv");

        assert!(header.contains("Spotify Data Dashboard"));
        assert!(header.contains("2025-01-01 12:00:00"));
        assert!(header.contains("a&amp;b.csv"));
    }

    #[test]
    fn test_generate_preview_section() {
        let table = create_test_table();
        let preview = HtmlDashboard::generate_preview_section(table.head(2), table.len());

        assert!(preview.contains("Showing 2 of 3 rows"));
        for column in PREVIEW_COLUMNS {
            assert!(preview.contains(&format!("<th>{column}</th>")));
        }
        assert_eq!(preview.matches("<tr>").count(), 3);
        assert!(preview.contains("&lt;script&gt;"));
        assert!(!preview.contains("<script>"));
    }

    #[test]
    fn test_generate_preview_section_empty() {
        let preview = HtmlDashboard::generate_preview_section(&[], 0);
        assert!(preview.contains("Showing 0 of 0 rows"));
        assert_eq!(preview.matches("<tr>").count(), 1);
    }

    #[test]
    fn test_generate_chart_card_missing_chart() {
        let card = HtmlDashboard::generate_chart_card(Analysis::TrackNameCloud, None);

        assert!(card.contains("Chart unavailable"));
        assert!(card.contains("Most Frequent Track Names"));
        assert!(card.contains(r#"id="track_name_cloud""#));
    }

    #[test]
    fn test_generate_html_content_layout() -> Result<()> {
        let data = create_test_dashboard_data()?;
        let html = HtmlDashboard::generate_html_content(&data);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Spotify Data Dashboard</title>"));
        assert_eq!(html.matches(r#"class="chart-row""#).count(), 5);
        assert_eq!(html.matches(r#"class="chart-card""#).count(), 10);
        assert!(!html.contains("<?xml"));

        // Preview table sits above the first chart row
        let preview_at = html.find(r#"class="preview""#);
        let first_row_at = html.find(r#"class="chart-row""#);
        assert!(preview_at < first_row_at);
        Ok(())
    }

    #[test]
    fn test_generate_html_content_chart_order() -> Result<()> {
        let data = create_test_dashboard_data()?;
        let html = HtmlDashboard::generate_html_content(&data);

        let positions: Vec<usize> = Analysis::ALL
            .iter()
            .filter_map(|a| html.find(&format!(r#"id="{}""#, a.slug())))
            .collect();
        assert_eq!(positions.len(), 10);
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        Ok(())
    }

    #[test]
    fn test_generate_css() {
        let css = HtmlDashboard::generate_css();
        assert!(css.contains(".row-grid"));
        assert!(css.contains("repeat(2"));
    }

    #[test]
    fn test_generate_dashboard_file_creation() -> std::result::Result<(), Box<dyn std::error::Error>>
    {
        let data = create_test_dashboard_data()?;
        let temp_file = NamedTempFile::new()?;

        HtmlDashboard::generate_dashboard(&data, temp_file.path())?;

        let content = fs::read_to_string(temp_file.path())?;
        assert!(content.contains("Spotify Data Dashboard"));
        assert!(content.contains("Word Clouds"));
        Ok(())
    }

    #[test]
    fn test_generate_dashboard_unwritable_path() -> Result<()> {
        let data = create_test_dashboard_data()?;
        let result = HtmlDashboard::generate_dashboard(&data, "/nonexistent/dir/dashboard.html");
        assert!(result.is_err());
        Ok(())
    }

    #[test]
    fn test_dashboard_rows_cover_every_analysis_once() {
        let mut seen: Vec<Analysis> = dashboard_constants::ROWS
            .iter()
            .flat_map(|(_, pair)| pair.iter().copied())
            .collect();
        assert_eq!(seen, Analysis::ALL.to_vec());
        seen.dedup();
        assert_eq!(seen.len(), 10);
    }
}
