//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::constants::{defaults, output_formats, validation};
use crate::core::error::{LogPulseError, Result};
use crate::data::schema::{ColumnRoles, LogKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory the log files are read from
    pub data_dir: Option<String>,

    /// Entries kept in each frequency table
    pub top_n: Option<usize>,

    /// Output format (text, json, minimal)
    pub output_format: Option<String>,

    /// Enable verbose logging
    pub verbose: Option<bool>,

    /// Attach a full dataset profile to every report
    pub include_profile: Option<bool>,

    /// Generate HTML dashboard report
    pub html_dashboard_path: Option<String>,

    /// Directory profiling reports are written to
    pub report_dir: Option<String>,

    /// Per-kind file names, relative to `data_dir` unless absolute
    pub files: Option<BTreeMap<LogKind, String>>,

    /// Per-kind column role overrides
    pub roles: Option<BTreeMap<LogKind, ColumnRoles>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: Some(defaults::DATA_DIR.to_string()),
            top_n: Some(defaults::TOP_N),
            output_format: Some(output_formats::DEFAULT.to_string()),
            verbose: Some(false),
            include_profile: Some(false),
            html_dashboard_path: None, // No dashboard by default
            report_dir: Some(defaults::REPORT_DIR.to_string()),
            files: None,
            roles: None,
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            LogPulseError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            LogPulseError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        // Validate the loaded configuration
        config.validate()?;
        Ok(config)
    }

    /// Try to find and load a config file in standard locations.
    ///
    /// Also returns one warning per file that exists but failed to load, for
    /// the caller to report once output is set up.
    pub fn load_from_standard_locations() -> (Self, Vec<String>) {
        // Current directory first, then parents
        Self::load_first_valid((0..=defaults::CONFIG_SEARCH_DEPTH).map(|depth| {
            PathBuf::from(format!(
                "{}{}",
                "../".repeat(depth),
                defaults::CONFIG_FILE_NAME
            ))
        }))
    }

    /// Load the first candidate file that parses and validates
    pub fn load_first_valid<I>(candidates: I) -> (Self, Vec<String>)
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut warnings = Vec::new();
        for path in candidates {
            if !path.is_file() {
                continue;
            }
            match Self::load_from_file(&path) {
                Ok(config) => return (config, warnings),
                Err(e) => warnings.push(format!(
                    "Ignoring config file {}: {e}",
                    path.display()
                )),
            }
        }

        // Fall back to defaults
        (Self::default(), warnings)
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        // Input
        if let Some(ref data_dir) = cli_config.data_dir {
            self.data_dir = Some(data_dir.clone());
        }

        // Analysis
        if let Some(top_n) = cli_config.top_n {
            self.top_n = Some(top_n);
        }
        if cli_config.include_profile {
            self.include_profile = Some(true);
        }

        // Output & format
        if cli_config.verbose {
            self.verbose = Some(true);
        }
        if let Some(ref output_format) = cli_config.output_format {
            self.output_format = Some(output_format.clone());
        }

        // Reports
        if let Some(ref dashboard_path) = cli_config.html_dashboard_path {
            self.html_dashboard_path = Some(dashboard_path.clone());
        }
        if let Some(ref report_dir) = cli_config.report_dir {
            self.report_dir = Some(report_dir.clone());
        }
    }

    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(self.data_dir.as_deref().unwrap_or(defaults::DATA_DIR))
    }

    pub fn top_n(&self) -> usize {
        self.top_n.unwrap_or(defaults::TOP_N)
    }

    pub fn output_format(&self) -> &str {
        self.output_format
            .as_deref()
            .unwrap_or(output_formats::DEFAULT)
    }

    pub fn report_dir(&self) -> PathBuf {
        PathBuf::from(self.report_dir.as_deref().unwrap_or(defaults::REPORT_DIR))
    }

    /// Location of the log file for `kind`
    pub fn path_for(&self, kind: LogKind) -> PathBuf {
        let file = self
            .files
            .as_ref()
            .and_then(|files| files.get(&kind))
            .map(String::as_str)
            .unwrap_or(kind.default_file_name());
        self.data_dir().join(file)
    }

    /// Column roles for `kind`, with the configured override taking precedence
    pub fn roles_for(&self, kind: LogKind) -> ColumnRoles {
        self.roles
            .as_ref()
            .and_then(|roles| roles.get(&kind))
            .cloned()
            .unwrap_or_else(|| kind.default_roles())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        // Validate top_n
        if let Some(top_n) = self.top_n {
            if top_n == 0 {
                return Err(LogPulseError::Config(
                    "top_n cannot be 0. Expected a positive integer.".to_string(),
                ));
            }
            if top_n > validation::MAX_TOP_N {
                return Err(LogPulseError::Config(format!(
                    "top_n of {top_n} is too large. Expected at most {}.",
                    validation::MAX_TOP_N
                )));
            }
        }

        // Validate data directory
        if let Some(ref data_dir) = self.data_dir
            && data_dir.trim().is_empty()
        {
            return Err(LogPulseError::Config(
                "data_dir cannot be empty.".to_string(),
            ));
        }

        // Validate output format
        if let Some(ref format) = self.output_format {
            match format.as_str() {
                f if output_formats::ALL.contains(&f) => {}
                _ => {
                    return Err(LogPulseError::Config(format!(
                        "Invalid output format '{format}'. Expected one of: {}.",
                        output_formats::ALL.join(", ")
                    )));
                }
            }
        }

        // Validate per-kind overrides
        if let Some(ref files) = self.files
            && let Some((kind, _)) = files.iter().find(|(_, file)| file.trim().is_empty())
        {
            return Err(LogPulseError::Config(format!(
                "File name for '{kind}' cannot be empty."
            )));
        }
        if let Some(ref roles) = self.roles {
            for (kind, roles) in roles {
                roles.validate().map_err(|e| {
                    LogPulseError::Config(format!("Invalid roles for '{kind}': {e}"))
                })?;
            }
        }

        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    // Input
    pub data_dir: Option<String>, // --data-dir
    pub input: Option<String>,    // --input

    // Analysis
    pub top_n: Option<usize>,  // --top
    pub include_profile: bool, // --profile

    // Output & format
    pub quiet: bool,                   // --quiet
    pub verbose: bool,                 // --verbose
    pub output_format: Option<String>, // --format
    pub no_progress: bool,             // --no-progress

    // Configuration
    pub config_file: Option<String>, // --config
    pub no_config: bool,             // --no-config

    // Reports
    pub html_dashboard_path: Option<String>, // --html-dashboard
    pub report_dir: Option<String>,          // profile --output-dir
}
