//! # Revenue Math
//!
//! Numeric kernels behind the monthly revenue forecast.
//! This crate provides least-squares trend fitting, exponential smoothing,
//! the additive Holt-Winters recursion and the fit statistics used to score it.

use thiserror::Error;

pub mod regression;
pub mod smoothing;
pub mod statistics;

pub use regression::{least_squares, LinearFit};
pub use smoothing::{exponential_smoothing, AdditiveHoltWinters, HoltWintersFit};
pub use statistics::{mean, rmse};

/// Errors that can occur in revenue series calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for revenue math operations
pub type Result<T> = std::result::Result<T, MathError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = MathError::InsufficientData("need 24 points".to_string());
        assert_eq!(
            err.to_string(),
            "Insufficient data for calculation: need 24 points"
        );
    }
}
