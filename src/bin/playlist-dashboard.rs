use clap::{CommandFactory, Parser};
use playlist_dashboard::analysis::Analysis;
use playlist_dashboard::config::{CliConfig, Config};
use playlist_dashboard::data::{PlaylistTable, load_table};
use playlist_dashboard::reporting::logging;
use playlist_dashboard::reporting::{HtmlDashboard, build_dashboard};
use playlist_dashboard::server;
use playlist_dashboard::ui::{Cli, Commands, ProgressReporter, SummaryReport, cli_to_config};
use playlist_dashboard::ui::{format_summary, print_completions};

use std::time::Instant;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Handle completion commands first
    if let Some(exit_code) = handle_completion_commands(&cli) {
        std::process::exit(exit_code);
    }

    match run_dashboard_logic(&cli).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Handle completion commands and return exit code if a completion command was processed
pub fn handle_completion_commands(cli: &Cli) -> Option<i32> {
    match cli.command {
        Some(Commands::CompletionGenerate { shell }) => {
            let mut app = Cli::command();
            print_completions(shell, &mut app);
            Some(0)
        }
        _ => None,
    }
}

/// Main dispatch extracted from main() for testing
pub async fn run_dashboard_logic(cli: &Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let cli_config = cli_to_config(cli);
    let config = load_and_merge_config(&cli_config)?;

    let output_settings = setup_output_settings(&cli_config, &config);
    logging::init_logger(output_settings.verbose, output_settings.quiet);
    logging::log_config_info(&config);

    match cli.command {
        Some(Commands::Serve { .. }) => {
            server::serve(&config).await?;
            Ok(0)
        }
        Some(Commands::Summary { .. }) => run_summary(&config),
        Some(Commands::Render { .. }) | None => run_render(&config, &output_settings),
        Some(Commands::CompletionGenerate { .. }) => Ok(0),
    }
}

/// Load configuration from file or standard locations and merge with CLI config
pub fn load_and_merge_config(cli_config: &CliConfig) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file)?
    } else {
        Config::load_from_standard_locations()
    };

    // Merge CLI arguments with configuration (CLI takes precedence)
    config.merge_with_cli(cli_config);
    config.validate()?;
    Ok(config)
}

/// Settings for output formatting and display
pub struct OutputSettings {
    pub quiet: bool,
    pub verbose: bool,
    pub show_progress: bool,
}

/// Setup output settings based on CLI and config
pub fn setup_output_settings(cli_config: &CliConfig, config: &Config) -> OutputSettings {
    let quiet = cli_config.quiet;
    let verbose = config.verbose.unwrap_or(false);
    let show_progress = !quiet && !cli_config.no_progress;

    OutputSettings {
        quiet,
        verbose,
        show_progress,
    }
}

/// Load the configured dataset, logging size and timing
pub fn load_dataset(
    config: &Config,
    progress: Option<&ProgressReporter>,
) -> Result<PlaylistTable, Box<dyn std::error::Error>> {
    let path = config.data_path();
    let spinner = progress.and_then(|p| p.create_spinner(&format!("Loading {}", path.display())));

    let started = Instant::now();
    let result = load_table(&path);
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let table = result?;
    logging::log_dataset_loaded(&path, table.len(), started.elapsed().as_millis());
    Ok(table)
}

/// Build the dashboard and write it to the configured output path
pub fn run_render(
    config: &Config,
    output_settings: &OutputSettings,
) -> Result<i32, Box<dyn std::error::Error>> {
    let mut progress = ProgressReporter::new(output_settings.show_progress);
    let table = load_dataset(config, Some(&progress))?;

    progress.start_charts(Analysis::ALL.len());
    let source = config.data_path().display().to_string();
    let data = build_dashboard(&table, &source, config.preview_rows(), &progress)?;
    progress.finish_charts();
    progress.finish_and_clear();

    let output_path = config.output_path();
    HtmlDashboard::generate_dashboard(&data, &output_path)?;

    if !output_settings.quiet {
        println!("📊 HTML dashboard generated: {}", output_path.display());
    }
    Ok(0)
}

/// Print every chart's aggregated data in the configured format
pub fn run_summary(config: &Config) -> Result<i32, Box<dyn std::error::Error>> {
    let table = load_dataset(config, None)?;
    let source = config.data_path().display().to_string();
    let report = SummaryReport::from_table(&table, &source);

    println!("{}", format_summary(&report, config.output_format())?);
    Ok(0)
}
