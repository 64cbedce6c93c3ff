use crate::config::Config;
use log::{debug, error, info, warn};
use std::path::Path;

use crate::analysis::Analysis;

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    // RUST_LOG refines the default level unless output is silenced
    if !quiet {
        builder.parse_default_env();
    }

    // A second initialisation (tests, embedding) keeps the first logger
    let _ = builder
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .try_init();

    debug!("Logger initialized with level: {level:?}");
}

/// Log configuration information
pub fn log_config_info(config: &Config) {
    info!(
        "Configuration: data={}, preview_rows={}, format={}",
        config.data_path().display(),
        config.preview_rows(),
        config.output_format()
    );
    debug!(
        "Output: path={}, bind={}",
        config.output_path().display(),
        config.bind_addr.as_deref().unwrap_or("-")
    );
}

/// Log a finished dataset load
pub fn log_dataset_loaded<P: AsRef<Path>>(path: P, rows: usize, duration_ms: u128) {
    info!(
        "Loaded {rows} row(s) from {} ({duration_ms}ms)",
        path.as_ref().display()
    );
    if rows == 0 {
        warn!("Dataset is empty, every chart will be blank");
    }
}

/// Log a rendered chart
pub fn log_chart_rendered(analysis: Analysis, entries: usize, duration_ms: u128) {
    debug!("✓ {analysis} -> {entries} entries ({duration_ms}ms)");
}

/// Log report completion
pub fn log_report_complete(charts: usize, duration_ms: u128) {
    info!("✅ Dashboard built: {charts} charts ({duration_ms}ms)");
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}

/// Log warning information
pub fn log_warning(message: &str) {
    warn!("{message}");
}
