//! # Forecast Engine
//!
//! Monthly revenue forecasting from dated transaction records.
//!
//! ## Features
//!
//! - Calendar-month aggregation with exact decimal sums
//! - Least-squares trend estimation with optional exponential pre-smoothing
//! - Seasonal decomposition by month-of-period averages or additive Holt-Winters
//! - Deterministic Holt-Winters parameter search minimising in-sample RMSE
//! - Projection with non-negative values and residual confidence bounds
//!
//! ## Seasonal Modes
//!
//! [`SeasonalMode::Average`] scales the trend by how each calendar month
//! compares to the overall mean. [`SeasonalMode::HoltWinters`] needs at least
//! two full periods of history and falls back to the average mode when its
//! parameter search fails, unless the fallback is disabled in the config.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use forecast_engine::{forecast_revenue, ForecastConfig, SeasonalMode, TransactionRecord};
//! use rust_decimal::Decimal;
//!
//! # fn main() -> forecast_engine::Result<()> {
//! let records = vec![
//!     TransactionRecord::new(
//!         NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
//!         Decimal::new(12000, 2),
//!     ),
//!     TransactionRecord::new(
//!         NaiveDate::from_ymd_opt(2024, 2, 3).unwrap(),
//!         Decimal::new(15050, 2),
//!     ),
//! ];
//!
//! let config = ForecastConfig::new(6, SeasonalMode::Average);
//! let result = forecast_revenue(&records, &config)?;
//!
//! for point in &result.forecast {
//!     println!("{}: {}", point.period, point.value);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod models;
pub mod optimizer;
pub mod projector;

// Re-export commonly used types
pub use crate::config::{ForecastConfig, SeasonalMode, MAX_HORIZON_MONTHS, MAX_PERIOD_LENGTH};
pub use crate::data::{
    aggregate, MonthPeriod, MonthlyPoint, MonthlySeries, Transaction, TransactionRecord,
};
pub use crate::engine::forecast_revenue;
pub use crate::error::{ForecastError, Result};
pub use crate::models::{ForecastPoint, ForecastResult, SmoothingParameters};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
