//! Error types for the forecast_engine crate

use revenue_math::MathError;
use thiserror::Error;

/// Custom error types for the forecast_engine crate
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ForecastError {
    /// Not enough observed months for the selected mode
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Non-positive horizon or period length, out-of-range coefficient, malformed record
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The smoothing parameter search produced no usable fit
    #[error("Optimization failure: {0}")]
    OptimizationFailure(String),

    /// Error from a numeric kernel that has no better classification
    #[error("Math error: {0}")]
    Math(MathError),

    /// Error from JSON encoding or decoding
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<MathError> for ForecastError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::InsufficientData(msg) => ForecastError::InsufficientData(msg),
            MathError::InvalidInput(msg) => ForecastError::InvalidArgument(msg),
            other => ForecastError::Math(other),
        }
    }
}

impl From<serde_json::Error> for ForecastError {
    fn from(err: serde_json::Error) -> Self {
        ForecastError::Serialization(err.to_string())
    }
}

impl ForecastError {
    /// Whether the caller may retry with average-mode seasonality
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ForecastError::OptimizationFailure(_))
    }
}
