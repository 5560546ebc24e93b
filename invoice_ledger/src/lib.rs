//! # Invoice Ledger
//!
//! Invoice records feeding the revenue forecast: CSV import with per-line
//! error reporting, CSV export, overdue marking and a thin bridge to
//! [`forecast_engine::forecast_revenue`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use forecast_engine::{ForecastConfig, SeasonalMode};
//! use invoice_ledger::{import_invoices, Ledger};
//! use std::fs::File;
//!
//! # fn main() -> invoice_ledger::Result<()> {
//! let mut ledger = Ledger::new();
//! let report = import_invoices(File::open("invoices.csv")?, &mut ledger)?;
//! println!("created {}, skipped {}", report.created, report.skipped);
//!
//! let result = ledger.forecast(&ForecastConfig::new(6, SeasonalMode::Average))?;
//! println!("{}", result.to_json()?);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod export;
pub mod import;
pub mod invoice;
pub mod status;

pub use crate::error::{LedgerError, Result};
pub use crate::export::{export_invoices, EXPORT_COLUMNS};
pub use crate::import::{import_invoices, ImportReport, REQUIRED_COLUMNS};
pub use crate::invoice::{Invoice, InvoiceStatus, Ledger};
pub use crate::status::mark_overdue;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
