// Command-line interface definitions and parsing for playlist-dashboard

use crate::config::CliConfig;
use crate::core::constants::output_formats;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "playlist-dashboard", author, version, about, long_about = None)]
pub struct Cli {
    /// Defaults to `render` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,

    // Output & Verbosity
    /// Suppress progress output and logging
    #[arg(short = 'q', long, global = true, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    /// Disable progress bars
    #[arg(long, global = true, help_heading = "Output & Verbosity")]
    pub no_progress: bool,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", global = true, help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, global = true, help_heading = "Configuration")]
    pub no_config: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the dashboard and write it as a single HTML file
    Render {
        /// Playlist CSV to load (default: spotify_data.csv)
        #[arg(short = 'd', long, value_name = "FILE")]
        data: Option<String>,

        /// HTML file to write (default: dashboard.html)
        #[arg(short = 'o', long, value_name = "FILE")]
        output: Option<String>,

        /// Rows shown in the preview table (default: 1000)
        #[arg(long, value_name = "COUNT")]
        preview_rows: Option<usize>,
    },
    /// Serve the dashboard over HTTP, rebuilding it on every request
    Serve {
        /// Playlist CSV to load (default: spotify_data.csv)
        #[arg(short = 'd', long, value_name = "FILE")]
        data: Option<String>,

        /// Address to listen on (default: 127.0.0.1:8501)
        #[arg(short = 'b', long, value_name = "ADDR")]
        bind: Option<String>,

        /// Rows shown in the preview table (default: 1000)
        #[arg(long, value_name = "COUNT")]
        preview_rows: Option<usize>,
    },
    /// Print the aggregated data behind every chart
    Summary {
        /// Playlist CSV to load (default: spotify_data.csv)
        #[arg(short = 'd', long, value_name = "FILE")]
        data: Option<String>,

        /// Output format
        #[arg(long, value_name = "FORMAT", value_parser = output_formats::ALL)]
        format: Option<String>,
    },
    /// Generate shell completions
    #[command(name = "completion-generate", arg_required_else_help = true)]
    CompletionGenerate {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Convert parsed CLI arguments into a CliConfig
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    let mut cli_config = CliConfig {
        quiet: cli.quiet,
        verbose: cli.verbose,
        no_progress: cli.no_progress,
        config_file: cli.config.clone(),
        no_config: cli.no_config,
        ..Default::default()
    };

    match cli.command {
        Some(Commands::Render {
            ref data,
            ref output,
            preview_rows,
        }) => {
            cli_config.data_path = data.clone();
            cli_config.output_path = output.clone();
            cli_config.preview_rows = preview_rows;
        }
        Some(Commands::Serve {
            ref data,
            ref bind,
            preview_rows,
        }) => {
            cli_config.data_path = data.clone();
            cli_config.bind_addr = bind.clone();
            cli_config.preview_rows = preview_rows;
        }
        Some(Commands::Summary {
            ref data,
            ref format,
        }) => {
            cli_config.data_path = data.clone();
            cli_config.output_format = format.clone();
        }
        Some(Commands::CompletionGenerate { .. }) | None => {}
    }

    cli_config
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["playlist-dashboard"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_to_config_default() {
        let cli = parse(&[]);
        assert!(cli.command.is_none());

        let config = cli_to_config(&cli);

        assert_eq!(config.data_path, None);
        assert_eq!(config.output_path, None);
        assert_eq!(config.bind_addr, None);
        assert_eq!(config.preview_rows, None);
        assert_eq!(config.output_format, None);
        assert!(!config.quiet);
        assert!(!config.verbose);
        assert!(!config.no_progress);
        assert_eq!(config.config_file, None);
        assert!(!config.no_config);
    }

    #[test]
    fn test_cli_to_config_render() {
        let cli = parse(&[
            "render",
            "--data",
            "playlists.csv",
            "-o",
            "out.html",
            "--preview-rows",
            "25",
        ]);
        let config = cli_to_config(&cli);

        assert_eq!(config.data_path, Some("playlists.csv".to_string()));
        assert_eq!(config.output_path, Some("out.html".to_string()));
        assert_eq!(config.preview_rows, Some(25));
        assert_eq!(config.bind_addr, None);
    }

    #[test]
    fn test_cli_to_config_serve() {
        let cli = parse(&["serve", "--bind", "0.0.0.0:9000"]);
        let config = cli_to_config(&cli);

        assert_eq!(config.bind_addr, Some("0.0.0.0:9000".to_string()));
        assert_eq!(config.output_path, None);
    }

    #[test]
    fn test_cli_to_config_summary_format() {
        let cli = parse(&["summary", "--format", "json"]);
        let config = cli_to_config(&cli);

        assert_eq!(config.output_format, Some("json".to_string()));
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        let result = Cli::try_parse_from(["playlist-dashboard", "summary", "--format", "yaml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_rejects_non_numeric_preview_rows() {
        let result =
            Cli::try_parse_from(["playlist-dashboard", "render", "--preview-rows", "many"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["render", "-q", "--no-config", "--config", "custom.toml"]);
        let config = cli_to_config(&cli);

        assert!(config.quiet);
        assert!(config.no_config);
        assert_eq!(config.config_file, Some("custom.toml".to_string()));
    }

    #[test]
    fn test_completion_generate_parses_shell() {
        let cli = parse(&["completion-generate", "bash"]);
        assert!(matches!(
            cli.command,
            Some(Commands::CompletionGenerate {
                shell: clap_complete::Shell::Bash
            })
        ));
    }
}
