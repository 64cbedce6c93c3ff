use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;

const CHART_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.green/white}] {pos}/{len} charts rendered ({msg})";
const SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";

/// Terminal progress for the report build.
///
/// Every method is a no-op when disabled, so callers never need to check
/// `--quiet` or `--no-progress` themselves. The chart bar is shared with
/// the rayon workers, hence `&self` everywhere after `start_charts`.
pub struct ProgressReporter {
    multi_progress: Arc<MultiProgress>,
    chart_progress: Option<ProgressBar>,
    enabled: bool,
}

impl ProgressReporter {
    pub fn new(enabled: bool) -> Self {
        Self {
            multi_progress: Arc::new(MultiProgress::new()),
            chart_progress: None,
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn start_charts(&mut self, total_charts: usize) {
        if !self.enabled {
            return;
        }

        let pb = self
            .multi_progress
            .add(ProgressBar::new(total_charts as u64));
        pb.set_style(Self::style(CHART_TEMPLATE).progress_chars("#>-"));
        pb.set_message("building");
        pb.enable_steady_tick(Duration::from_millis(120));
        self.chart_progress = Some(pb);
    }

    /// Record one finished chart. Safe to call from any thread.
    pub fn chart_done(&self, name: &str) {
        if let Some(ref pb) = self.chart_progress {
            pb.set_message(name.to_string());
            pb.inc(1);
        }
    }

    pub fn finish_charts(&self) {
        if let Some(ref pb) = self.chart_progress {
            pb.finish_with_message("✓ All charts rendered");
        }
    }

    pub fn finish_and_clear(&self) {
        if self.enabled {
            self.multi_progress.clear().unwrap_or(());
        }
    }

    /// Create a simple spinner for indeterminate work such as loading the CSV
    pub fn create_spinner(&self, message: &str) -> Option<ProgressBar> {
        if !self.enabled {
            return None;
        }

        let pb = self.multi_progress.add(ProgressBar::new_spinner());
        pb.set_style(Self::spinner_style());
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(120));
        Some(pb)
    }

    fn style(template: &str) -> ProgressStyle {
        ProgressStyle::default_bar()
            .template(template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template(SPINNER_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}
