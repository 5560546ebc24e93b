//! Error types for the invoice_ledger crate

use forecast_engine::ForecastError;
use thiserror::Error;

/// Custom error types for the invoice_ledger crate
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Error when reading or writing files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV input or a failed CSV write
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The CSV header lacks required columns
    #[error("CSV is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// A row that cannot be turned into an invoice
    #[error("Line {line}: {reason}")]
    InvalidRow { line: usize, reason: String },

    /// A status other than `open` or `overdue`
    #[error("Invalid status: {0} (use open or overdue)")]
    InvalidStatus(String),

    /// Error from the forecasting engine
    #[error("Forecast error: {0}")]
    Forecast(#[from] ForecastError),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, LedgerError>;
