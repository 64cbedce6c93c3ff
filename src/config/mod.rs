//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments.

use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::core::constants::{defaults, output_formats};
use crate::core::error::{DashboardError, Result};
use crate::reporting::logging;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Playlist CSV to load
    pub data_path: Option<String>,

    /// Where `render` writes the HTML report
    pub output_path: Option<String>,

    /// Socket address for `serve`
    pub bind_addr: Option<String>,

    /// Number of rows in the preview table
    pub preview_rows: Option<usize>,

    /// Output format for `summary` (text, json)
    pub output_format: Option<String>,

    /// Enable verbose logging
    pub verbose: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: Some(defaults::DATA_PATH.to_string()),
            output_path: Some(defaults::OUTPUT_PATH.to_string()),
            bind_addr: Some(defaults::BIND_ADDR.to_string()),
            preview_rows: Some(defaults::PREVIEW_ROWS),
            output_format: Some(output_formats::DEFAULT.to_string()),
            verbose: Some(false),
        }
    }
}

impl Config {
    /// Load configuration from file. Fields absent from the file keep
    /// their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            DashboardError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let file_config: Config = toml::from_str(&content)?;

        let mut config = Self::default();
        config.overlay(file_config);
        config.validate()?;
        Ok(config)
    }

    /// Try to find and load a config file in `start` or its parents
    pub fn load_from_dir(start: &Path) -> Option<Self> {
        for candidate in Self::candidate_paths(start) {
            if !candidate.is_file() {
                continue;
            }
            match Self::load_from_file(&candidate) {
                Ok(config) => return Some(config),
                Err(e) => logging::log_warning(&format!(
                    "Ignoring config file {}: {e}",
                    candidate.display()
                )),
            }
        }
        None
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> Self {
        std::env::current_dir()
            .ok()
            .and_then(|dir| Self::load_from_dir(&dir))
            .unwrap_or_default()
    }

    fn candidate_paths(start: &Path) -> Vec<PathBuf> {
        start
            .ancestors()
            .take(defaults::CONFIG_SEARCH_DEPTH + 1)
            .map(|dir| dir.join(defaults::CONFIG_FILE_NAME))
            .collect()
    }

    /// Copy every field set in `other` over this config
    fn overlay(&mut self, other: Config) {
        if other.data_path.is_some() {
            self.data_path = other.data_path;
        }
        if other.output_path.is_some() {
            self.output_path = other.output_path;
        }
        if other.bind_addr.is_some() {
            self.bind_addr = other.bind_addr;
        }
        if other.preview_rows.is_some() {
            self.preview_rows = other.preview_rows;
        }
        if other.output_format.is_some() {
            self.output_format = other.output_format;
        }
        if other.verbose.is_some() {
            self.verbose = other.verbose;
        }
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        if let Some(ref data_path) = cli_config.data_path {
            self.data_path = Some(data_path.clone());
        }
        if let Some(ref output_path) = cli_config.output_path {
            self.output_path = Some(output_path.clone());
        }
        if let Some(ref bind_addr) = cli_config.bind_addr {
            self.bind_addr = Some(bind_addr.clone());
        }
        if let Some(preview_rows) = cli_config.preview_rows {
            self.preview_rows = Some(preview_rows);
        }
        if let Some(ref output_format) = cli_config.output_format {
            self.output_format = Some(output_format.clone());
        }
        if cli_config.verbose {
            self.verbose = Some(true);
        }
    }

    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(self.data_path.as_deref().unwrap_or(defaults::DATA_PATH))
    }

    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(self.output_path.as_deref().unwrap_or(defaults::OUTPUT_PATH))
    }

    pub fn preview_rows(&self) -> usize {
        self.preview_rows.unwrap_or(defaults::PREVIEW_ROWS)
    }

    pub fn output_format(&self) -> &str {
        self.output_format
            .as_deref()
            .unwrap_or(output_formats::DEFAULT)
    }

    /// Parse the configured bind address
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let addr = self.bind_addr.as_deref().unwrap_or(defaults::BIND_ADDR);
        addr.parse().map_err(|_| {
            DashboardError::Config(format!(
                "Invalid bind address '{addr}'. Expected HOST:PORT, for example {}.",
                defaults::BIND_ADDR
            ))
        })
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.preview_rows == Some(0) {
            return Err(DashboardError::Config(
                "Preview rows cannot be 0. Expected a positive integer.".to_string(),
            ));
        }

        if let Some(ref format) = self.output_format
            && !output_formats::ALL.contains(&format.as_str())
        {
            return Err(DashboardError::Config(format!(
                "Invalid output format '{format}'. Expected one of: {}.",
                output_formats::ALL.join(", ")
            )));
        }

        if let Some(ref path) = self.data_path
            && path.trim().is_empty()
        {
            return Err(DashboardError::Config(
                "Data path cannot be empty.".to_string(),
            ));
        }

        self.bind_addr()?;

        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    pub data_path: Option<String>,     // --data
    pub output_path: Option<String>,   // --output
    pub bind_addr: Option<String>,     // --bind
    pub preview_rows: Option<usize>,   // --preview-rows
    pub output_format: Option<String>, // --format

    pub quiet: bool,       // --quiet
    pub verbose: bool,     // --verbose
    pub no_progress: bool, // --no-progress

    pub config_file: Option<String>, // --config
    pub no_config: bool,             // --no-config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.data_path, Some(defaults::DATA_PATH.to_string()));
        assert_eq!(config.preview_rows, Some(1000));
        assert_eq!(
            config.output_format,
            Some(output_formats::DEFAULT.to_string())
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_load_from_file() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"data_path = \"playlists.csv\"\npreview_rows = 50\n")?;

        let config = Config::load_from_file(file.path())?;
        assert_eq!(config.data_path, Some("playlists.csv".to_string()));
        assert_eq!(config.preview_rows, Some(50));
        // Unset fields keep their defaults
        assert_eq!(config.output_path, Some(defaults::OUTPUT_PATH.to_string()));
        assert_eq!(config.bind_addr, Some(defaults::BIND_ADDR.to_string()));

        Ok(())
    }

    #[test]
    fn test_config_load_from_file_invalid_toml() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"preview_rows = [not valid")?;

        let err = Config::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, DashboardError::TomlParsing(_)));
        assert!(err.to_string().starts_with("Configuration error: invalid TOML"));
        Ok(())
    }

    #[test]
    fn test_config_load_from_file_unknown_key() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"charts = 12\n")?;

        assert!(Config::load_from_file(file.path()).is_err());
        Ok(())
    }

    #[test]
    fn test_config_load_from_file_nonexistent() {
        let result = Config::load_from_file("/nonexistent/.playlist-dashboard.toml");
        assert!(matches!(result, Err(DashboardError::Config(_))));
    }

    #[test]
    fn test_config_load_from_file_with_validation() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"preview_rows = 0\n")?;

        assert!(Config::load_from_file(file.path()).is_err());
        Ok(())
    }

    #[test]
    fn test_load_from_dir_searches_parents() -> Result<()> {
        let root = tempfile::tempdir()?;
        let nested = root.path().join("a").join("b");
        fs::create_dir_all(&nested)?;
        fs::write(
            root.path().join(defaults::CONFIG_FILE_NAME),
            "output_path = \"report.html\"\n",
        )?;

        let config = Config::load_from_dir(&nested);
        assert_eq!(
            config.and_then(|c| c.output_path),
            Some("report.html".to_string())
        );
        Ok(())
    }

    #[test]
    fn test_load_from_dir_stops_at_search_depth() -> Result<()> {
        let root = tempfile::tempdir()?;
        let nested = root.path().join("a").join("b").join("c").join("d");
        fs::create_dir_all(&nested)?;
        fs::write(
            root.path().join(defaults::CONFIG_FILE_NAME),
            "output_path = \"report.html\"\n",
        )?;

        assert!(Config::load_from_dir(&nested).is_none());
        Ok(())
    }

    #[test]
    fn test_load_from_dir_skips_invalid_file() -> Result<()> {
        let root = tempfile::tempdir()?;
        let nested = root.path().join("child");
        fs::create_dir_all(&nested)?;
        fs::write(nested.join(defaults::CONFIG_FILE_NAME), "preview_rows = 0\n")?;
        fs::write(
            root.path().join(defaults::CONFIG_FILE_NAME),
            "preview_rows = 25\n",
        )?;

        let config = Config::load_from_dir(&nested);
        assert_eq!(config.and_then(|c| c.preview_rows), Some(25));
        Ok(())
    }

    #[test]
    fn test_config_merge_with_cli() {
        let mut config = Config::default();
        let cli_config = CliConfig {
            data_path: Some("other.csv".to_string()),
            preview_rows: Some(10),
            verbose: true,
            ..Default::default()
        };

        config.merge_with_cli(&cli_config);

        assert_eq!(config.data_path, Some("other.csv".to_string()));
        assert_eq!(config.preview_rows, Some(10));
        assert_eq!(config.verbose, Some(true));
    }

    #[test]
    fn test_config_merge_preserves_unset_values() {
        let mut config = Config {
            output_path: Some("keep.html".to_string()),
            verbose: Some(true),
            ..Default::default()
        };

        config.merge_with_cli(&CliConfig::default());

        assert_eq!(config.output_path, Some("keep.html".to_string()));
        assert_eq!(config.verbose, Some(true));
    }

    #[test]
    fn test_accessors_fall_back_to_defaults() -> Result<()> {
        let config = Config {
            data_path: None,
            output_path: None,
            bind_addr: None,
            preview_rows: None,
            output_format: None,
            verbose: None,
        };

        assert_eq!(config.data_path(), PathBuf::from(defaults::DATA_PATH));
        assert_eq!(config.output_path(), PathBuf::from(defaults::OUTPUT_PATH));
        assert_eq!(config.preview_rows(), defaults::PREVIEW_ROWS);
        assert_eq!(config.output_format(), output_formats::TEXT);
        assert_eq!(config.bind_addr()?.port(), 8501);
        Ok(())
    }

    #[test]
    fn test_config_validation_invalid_output_format() {
        let config = Config {
            output_format: Some("yaml".to_string()),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("text, json"));
    }

    #[test]
    fn test_config_validation_invalid_bind_addr() {
        let config = Config {
            bind_addr: Some("localhost".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_empty_data_path() {
        let config = Config {
            data_path: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cli_config_default() {
        let cli_config = CliConfig::default();
        assert!(cli_config.data_path.is_none());
        assert!(!cli_config.quiet);
        assert!(!cli_config.no_config);
    }
}
