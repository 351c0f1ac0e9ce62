//! Error types for the OHLCV feature toolkit.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Pattern a timestamp string has to follow exactly.
pub const TIMESTAMP_PATTERN: &str = "YYYY-MM-DD HH:MM:SS";

/// Main error type for the toolkit.
///
/// Non-finite indicator values (division by zero) are not errors; they are
/// carried inside the output series.
#[derive(Error, Debug)]
pub enum Error {
    /// A required named column is absent from the input table.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// Window parameter is not a positive integer.
    #[error("Invalid window: {0}")]
    InvalidWindow(String),

    /// Numeric parameter outside its accepted range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Timestamp string does not match the required pattern.
    #[error("Timestamp string must match 'YYYY-MM-DD HH:MM:SS', got {0:?}")]
    InvalidTimestampFormat(String),

    /// Timestamp input is neither a date/time value nor a string.
    #[error("Timestamp input must be a datetime object or a timestamp string, got {0}")]
    InvalidTimestampType(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data error (inconsistent table shape, wrong column type, bad cell).
    #[error("Data error: {0}")]
    Data(String),

    /// Delimited file error.
    #[error("CSV error: {0}")]
    Csv(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a missing column error.
    pub fn missing_column(name: impl Into<String>) -> Self {
        Error::MissingColumn(name.into())
    }

    /// Create an invalid window error.
    pub fn invalid_window(msg: impl Into<String>) -> Self {
        Error::InvalidWindow(msg.into())
    }

    /// Create an invalid parameter error.
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Error::InvalidParameter(msg.into())
    }

    /// Create a timestamp format error carrying the offending input.
    pub fn invalid_timestamp_format(input: impl Into<String>) -> Self {
        Error::InvalidTimestampFormat(input.into())
    }

    /// Create a timestamp type error naming the received kind.
    pub fn invalid_timestamp_type(kind: impl Into<String>) -> Self {
        Error::InvalidTimestampType(kind.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a data error.
    pub fn data(msg: impl Into<String>) -> Self {
        Error::Data(msg.into())
    }

    /// Create a CSV error.
    pub fn csv(msg: impl ToString) -> Self {
        Error::Csv(msg.to_string())
    }
}
