use std::fmt;

/// Error types for dashboard operations
#[derive(Debug)]
pub enum DashboardError {
    /// IO error (file operations, socket binding, etc.)
    Io(std::io::Error),

    /// CSV reading or row deserialization error
    Csv(csv::Error),

    /// A `modified_at` value that matches none of the accepted formats
    DateParse { line: u64, value: String },

    /// Configuration error
    Config(String),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// Chart drawing error
    Chart(String),

    /// JSON serialization error
    Json(serde_json::Error),

    /// File not found error
    FileNotFound(String),

    /// Invalid argument error
    InvalidArgument(String),
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardError::Io(err) => write!(f, "IO error: {err}"),
            DashboardError::Csv(err) => write!(f, "CSV error: {err}"),
            DashboardError::DateParse { line, value } => write!(
                f,
                "Date parse error: line {line}: '{value}' is not a recognised modified_at timestamp"
            ),
            DashboardError::Config(msg) => write!(f, "Configuration error: {msg}"),
            DashboardError::TomlParsing(err) => {
                write!(f, "Configuration error: invalid TOML: {err}")
            }
            DashboardError::Chart(msg) => write!(f, "Chart error: {msg}"),
            DashboardError::Json(err) => write!(f, "JSON error: {err}"),
            DashboardError::FileNotFound(path) => write!(f, "File not found: {path}"),
            DashboardError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for DashboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DashboardError::Io(err) => Some(err),
            DashboardError::Csv(err) => Some(err),
            DashboardError::TomlParsing(err) => Some(err),
            DashboardError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DashboardError {
    fn from(err: std::io::Error) -> Self {
        DashboardError::Io(err)
    }
}

impl From<csv::Error> for DashboardError {
    fn from(err: csv::Error) -> Self {
        DashboardError::Csv(err)
    }
}

impl From<toml::de::Error> for DashboardError {
    fn from(err: toml::de::Error) -> Self {
        DashboardError::TomlParsing(err)
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::Json(err)
    }
}

/// Type alias for Results using DashboardError
pub type Result<T> = std::result::Result<T, DashboardError>;
