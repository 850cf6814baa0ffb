use std::fmt;

/// Error types for logpulse operations
#[derive(Debug)]
pub enum LogPulseError {
    /// IO error (file operations, etc.)
    Io(std::io::Error),

    /// Malformed CSV input
    Csv(csv::Error),

    /// Configuration error
    Config(String),

    /// JSON serialization error
    Json(serde_json::Error),

    /// Input file does not exist
    FileNotFound(String),

    /// A configured column is absent from the loaded dataset
    ColumnNotFound { column: String, dataset: String },

    /// A cell could not be read as the type its column role requires
    InvalidValue {
        column: String,
        value: String,
        expected: &'static str,
    },

    /// Invalid argument error
    InvalidArgument(String),
}

impl fmt::Display for LogPulseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogPulseError::Io(err) => write!(f, "IO error: {err}"),
            LogPulseError::Csv(err) => write!(f, "CSV error: {err}"),
            LogPulseError::Config(msg) => write!(f, "Configuration error: {msg}"),
            LogPulseError::Json(err) => write!(f, "JSON error: {err}"),
            LogPulseError::FileNotFound(path) => write!(f, "File not found: {path}"),
            LogPulseError::ColumnNotFound { column, dataset } => {
                write!(f, "Column not found: '{column}' is not a column of {dataset}")
            }
            LogPulseError::InvalidValue {
                column,
                value,
                expected,
            } => write!(
                f,
                "Invalid value: '{value}' in column '{column}' is not a valid {expected}"
            ),
            LogPulseError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for LogPulseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LogPulseError::Io(err) => Some(err),
            LogPulseError::Csv(err) => Some(err),
            LogPulseError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LogPulseError {
    fn from(err: std::io::Error) -> Self {
        LogPulseError::Io(err)
    }
}

impl From<csv::Error> for LogPulseError {
    fn from(err: csv::Error) -> Self {
        LogPulseError::Csv(err)
    }
}

impl From<serde_json::Error> for LogPulseError {
    fn from(err: serde_json::Error) -> Self {
        LogPulseError::Json(err)
    }
}

/// Type alias for Results using LogPulseError
pub type Result<T> = std::result::Result<T, LogPulseError>;
