//! # Revenue Forecast Workspace
//!
//! Umbrella crate over the workspace members:
//!
//! - [`revenue_math`]: regression, smoothing and fit statistics
//! - [`forecast_engine`]: monthly aggregation, seasonal models and projection
//! - [`invoice_ledger`]: invoice CSV import/export and overdue tracking
//!
//! ## Example
//!
//! ```
//! use revenue_forecast_workspace::forecast_engine::{
//!     forecast_revenue, ForecastConfig, SeasonalMode, TransactionRecord,
//! };
//! use revenue_forecast_workspace::invoice_ledger::{import_invoices, Ledger};
//!
//! let csv = "date,amount,client,project,category,paid,external_id\n\
//!            2024-01-10,100,Acme,Site,Design,yes,INV-1\n\
//!            2024-02-10,200,Acme,Site,Design,no,INV-2\n";
//!
//! let mut ledger = Ledger::new();
//! let report = import_invoices(csv.as_bytes(), &mut ledger).unwrap();
//! assert_eq!(report.created, 2);
//!
//! let result = ledger.forecast(&ForecastConfig::new(1, SeasonalMode::Average)).unwrap();
//! assert_eq!(result.forecast.len(), 1);
//!
//! let empty: Vec<TransactionRecord> = Vec::new();
//! assert!(forecast_revenue(&empty, &ForecastConfig::default()).is_err());
//! ```

pub use forecast_engine;
pub use invoice_ledger;
pub use revenue_math;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
