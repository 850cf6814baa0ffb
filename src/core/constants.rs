/// Application-wide constants to avoid magic values throughout the codebase.
///
/// This module centralizes the literal values shared by the loader, the
/// summarizer and the presentation layer.
/// Output format constants
pub mod output_formats {
    /// Text output format - colorful, emoji-enhanced output
    pub const TEXT: &str = "text";
    /// JSON output format - structured output for automation
    pub const JSON: &str = "json";
    /// Minimal output format - plain `key value` lines without colors
    pub const MINIMAL: &str = "minimal";

    /// Default output format
    pub const DEFAULT: &str = TEXT;

    /// All valid output formats
    pub const ALL: [&str; 3] = [TEXT, JSON, MINIMAL];
}

/// Default configuration values
pub mod defaults {
    /// Directory the log files are looked up in
    pub const DATA_DIR: &str = ".";
    /// Number of entries kept in frequency tables
    pub const TOP_N: usize = 10;
    /// Directory profiling reports are written to
    pub const REPORT_DIR: &str = "profiling_reports";
    /// Name of the configuration file searched in standard locations
    pub const CONFIG_FILE_NAME: &str = ".logpulse.toml";
    /// How many parent directories are searched for a config file
    pub const CONFIG_SEARCH_DEPTH: usize = 3;
}

/// Limits used when building a dataset profile
pub mod profile {
    /// Number of text columns that get a top-values table
    pub const MAX_CATEGORICAL_COLUMNS: usize = 5;
    /// Entries per top-values table
    pub const TOP_VALUES: usize = 10;
    /// Rows included in the sample section
    pub const SAMPLE_ROWS: usize = 10;
}

/// Cell values read as null when loading a log
pub const NULL_TOKENS: [&str; 14] = [
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "null", "NULL", "None", "<NA>", "#N/A",
    "#NA",
];

/// Validation constants
pub mod validation {
    /// Upper bound accepted for `top_n`
    pub const MAX_TOP_N: usize = 10_000;
}

/// Display and formatting constants
pub mod display {
    /// Emoji for success status
    pub const SUCCESS_EMOJI: &str = "✅";
    /// Emoji for warning status
    pub const WARNING_EMOJI: &str = "⚠️";
    /// Emoji for error status
    pub const ERROR_EMOJI: &str = "❌";
    /// Emoji for metric sections
    pub const METRICS_EMOJI: &str = "📊";
    /// Emoji for file information
    pub const FILE_EMOJI: &str = "📁";
    /// Rendering of an undefined metric
    pub const UNDEFINED: &str = "n/a";
}
