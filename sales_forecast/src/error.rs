//! Error types for the sales_forecast crate

use forecast_math::MathError;
use thiserror::Error;

/// Errors surfaced by every sales_forecast action
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Malformed or inconsistent user input. The session is left unchanged.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Failure inside the fitting/prediction model
    #[error("Forecasting error: {0}")]
    ForecastingError(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Spreadsheet or CSV writer failure
    #[error("Export error: {0}")]
    ExportError(String),

    /// Unreadable or invalid configuration file
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// JSON encoding failure
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl ForecastError {
    /// Shorthand for building a [`ForecastError::ValidationError`]
    pub fn validation(message: impl Into<String>) -> Self {
        ForecastError::ValidationError(message.into())
    }

    /// True for errors caused by user input rather than the model or the environment
    pub fn is_validation(&self) -> bool {
        matches!(self, ForecastError::ValidationError(_))
    }
}

impl From<MathError> for ForecastError {
    fn from(err: MathError) -> Self {
        ForecastError::ForecastingError(err.to_string())
    }
}

impl From<csv::Error> for ForecastError {
    fn from(err: csv::Error) -> Self {
        ForecastError::ExportError(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for ForecastError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ForecastError::ExportError(err.to_string())
    }
}

impl From<serde_json::Error> for ForecastError {
    fn from(err: serde_json::Error) -> Self {
        ForecastError::SerializationError(err.to_string())
    }
}

impl From<toml::de::Error> for ForecastError {
    fn from(err: toml::de::Error) -> Self {
        ForecastError::ConfigError(err.to_string())
    }
}

impl From<toml::ser::Error> for ForecastError {
    fn from(err: toml::ser::Error) -> Self {
        ForecastError::ConfigError(err.to_string())
    }
}
