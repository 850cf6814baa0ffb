// Command-line interface definitions and parsing for logpulse

use crate::config::CliConfig;
use crate::core::constants::{output_formats, validation};
use crate::core::error::{LogPulseError, Result};
use crate::data::schema::LogKind;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Log kinds to summarize (default: all five)
    #[arg(value_enum)]
    pub kinds: Vec<LogKind>,

    // Input
    /// Directory containing the log files (default: current directory)
    #[arg(
        short = 'd',
        long,
        value_name = "DIR",
        global = true,
        help_heading = "Input"
    )]
    pub data_dir: Option<String>,

    /// Read a single log kind from this file
    #[arg(
        short = 'i',
        long,
        value_name = "PATH",
        global = true,
        help_heading = "Input"
    )]
    pub input: Option<String>,

    // Analysis
    /// Entries kept in each frequency table (default: 10)
    #[arg(short = 'n', long, value_name = "COUNT", help_heading = "Analysis")]
    pub top: Option<usize>,

    /// Attach a full dataset profile to each report
    #[arg(long, help_heading = "Analysis")]
    pub profile: bool,

    // Output & Verbosity
    /// Suppress progress output
    #[arg(short = 'q', long, global = true, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    /// Output format (default: text)
    #[arg(long, value_name = "FORMAT", value_parser = output_formats::ALL, help_heading = "Output & Verbosity")]
    pub format: Option<String>,

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

    // Reports
    /// Generate HTML dashboard report
    #[arg(long, value_name = "PATH", help_heading = "Reports")]
    pub html_dashboard: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write an HTML profiling report per log file
    Profile {
        /// Log kinds to profile (default: all five)
        #[arg(value_enum)]
        kinds: Vec<LogKind>,

        /// Directory the reports are written to (default: profiling_reports)
        #[arg(short = 'o', long, value_name = "DIR")]
        output_dir: Option<String>,
    },
    /// Generate shell completions
    #[command(name = "completion-generate", arg_required_else_help = true)]
    CompletionGenerate {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl Cli {
    /// Selected kinds, all five when none were named
    pub fn selected_kinds(&self) -> Vec<LogKind> {
        select_kinds(self.named_kinds())
    }

    /// Kinds given on the command line, from `profile` when it is used
    pub fn named_kinds(&self) -> &[LogKind] {
        match &self.command {
            Some(Commands::Profile { kinds, .. }) => kinds,
            _ => &self.kinds,
        }
    }
}

/// Deduplicate `named` keeping order, or every kind when empty
pub fn select_kinds(named: &[LogKind]) -> Vec<LogKind> {
    if named.is_empty() {
        return LogKind::ALL.to_vec();
    }
    let mut kinds: Vec<LogKind> = Vec::with_capacity(named.len());
    for kind in named {
        if !kinds.contains(kind) {
            kinds.push(*kind);
        }
    }
    kinds
}

/// Convert derive-based CLI arguments directly to CliConfig structure
pub fn cli_to_config(cli: &Cli) -> Result<CliConfig> {
    let mut cli_config = CliConfig::default();

    // Input
    cli_config.data_dir = cli.data_dir.clone();
    if let Some(ref input) = cli.input {
        let named = cli.named_kinds();
        let kinds = select_kinds(named);
        if named.is_empty() || kinds.len() != 1 {
            return Err(LogPulseError::InvalidArgument(format!(
                "--input '{input}' needs exactly one log kind, got {}",
                if named.is_empty() {
                    "none".to_string()
                } else {
                    kinds.len().to_string()
                }
            )));
        }
        cli_config.input = Some(input.clone());
    }

    // Analysis
    if let Some(top) = cli.top {
        if top == 0 {
            return Err(LogPulseError::InvalidArgument(
                "--top cannot be 0. Expected a positive integer.".to_string(),
            ));
        }
        if top > validation::MAX_TOP_N {
            return Err(LogPulseError::InvalidArgument(format!(
                "--top {top} is too large. Expected at most {}.",
                validation::MAX_TOP_N
            )));
        }
        cli_config.top_n = Some(top);
    }
    cli_config.include_profile = cli.profile;

    // Output & format
    cli_config.quiet = cli.quiet;
    cli_config.verbose = cli.verbose;
    cli_config.no_progress = cli.no_progress;
    cli_config.output_format = cli.format.clone();

    // Configuration
    cli_config.config_file = cli.config.clone();
    cli_config.no_config = cli.no_config;

    // Reports
    cli_config.html_dashboard_path = cli.html_dashboard.clone();
    if let Some(Commands::Profile {
        output_dir: Some(dir),
        ..
    }) = &cli.command
    {
        cli_config.report_dir = Some(dir.clone());
    }

    Ok(cli_config)
}
