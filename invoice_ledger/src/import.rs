//! CSV invoice import
//!
//! Rows are parsed independently: a malformed row is reported as
//! `"Line {n}: {reason}"` (counting data rows from 1) and the import carries
//! on. Only a header without the required columns aborts the whole file.
//!
//! Surrounding whitespace is ignored in headers and in the parsed fields
//! (`date`, `amount`, `paid`, `status`). Text fields keep their value as
//! written; only a whitespace-only text field counts as blank.

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::str::FromStr;
use tracing::{debug, info};

use crate::error::{LedgerError, Result};
use crate::invoice::{
    Invoice, InvoiceStatus, Ledger, DEFAULT_CATEGORY, DEFAULT_CLIENT, DEFAULT_PROJECT,
};

/// Columns every import file must have, in sorted order
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "amount",
    "category",
    "client",
    "date",
    "external_id",
    "paid",
    "project",
];

/// Outcome of one import run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    /// Invoices added to the ledger
    pub created: usize,
    /// Rows whose external id was already recorded
    pub skipped: usize,
    /// One message per rejected row
    pub errors: Vec<String>,
}

impl ImportReport {
    /// Whether every row was imported or skipped
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Positions of the known columns in the header
struct ColumnIndex {
    date: usize,
    amount: usize,
    client: usize,
    project: usize,
    category: usize,
    paid: usize,
    external_id: usize,
    description: Option<usize>,
    status: Option<usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let position = |name: &str| headers.iter().position(|h| h == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| position(**name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(LedgerError::MissingColumns(missing));
        }

        let require = |name: &str| {
            position(name).ok_or_else(|| LedgerError::MissingColumns(vec![name.to_string()]))
        };

        Ok(Self {
            date: require("date")?,
            amount: require("amount")?,
            client: require("client")?,
            project: require("project")?,
            category: require("category")?,
            paid: require("paid")?,
            external_id: require("external_id")?,
            description: position("description"),
            status: position("status"),
        })
    }
}

/// Import invoices from CSV into `ledger`.
///
/// Blank client, project and category fields take their defaults, and a blank
/// or absent `status` column means open. A row whose
/// non-empty `external_id` is already in the ledger, including one imported
/// earlier in the same file, is skipped.
pub fn import_invoices<R: Read>(reader: R, ledger: &mut Ledger) -> Result<ImportReport> {
    let mut csv_reader = ReaderBuilder::new()
        .trim(Trim::Headers)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let columns = ColumnIndex::from_headers(&headers)?;

    let mut report = ImportReport::default();

    for (i, row) in csv_reader.records().enumerate() {
        let line = i + 1;
        let parsed = row
            .map_err(|e| LedgerError::InvalidRow {
                line,
                reason: e.to_string(),
            })
            .and_then(|record| parse_row(&record, &columns, line));

        match parsed {
            Ok(invoice) => {
                if ledger.contains_external_id(&invoice.external_id) {
                    debug!(line, external_id = %invoice.external_id, "skipping known invoice");
                    report.skipped += 1;
                } else {
                    ledger.push(invoice);
                    report.created += 1;
                }
            }
            Err(err) => {
                debug!(line, error = %err, "rejected invoice row");
                report.errors.push(err.to_string());
            }
        }
    }

    info!(
        created = report.created,
        skipped = report.skipped,
        errors = report.errors.len(),
        "invoice import finished"
    );

    Ok(report)
}

fn parse_row(record: &StringRecord, columns: &ColumnIndex, line: usize) -> Result<Invoice> {
    let field = |index: usize| record.get(index).unwrap_or("");
    let invalid = |reason: String| LedgerError::InvalidRow { line, reason };

    let date = NaiveDate::parse_from_str(field(columns.date).trim(), "%Y-%m-%d")
        .map_err(|_| invalid("Invalid date (use YYYY-MM-DD)".to_string()))?;

    let amount = Decimal::from_str(field(columns.amount).trim())
        .map_err(|e| invalid(format!("Invalid amount: {}", e)))?;
    if amount <= Decimal::ZERO {
        return Err(invalid("Invalid amount: Amount must be positive".to_string()));
    }

    let status = match columns.status.map(|index| field(index).trim()) {
        None | Some("") => InvoiceStatus::Open,
        Some(value) => value
            .parse::<InvoiceStatus>()
            .map_err(|e| invalid(e.to_string()))?,
    };

    Ok(Invoice {
        date,
        amount,
        client: or_default(field(columns.client), DEFAULT_CLIENT),
        project: or_default(field(columns.project), DEFAULT_PROJECT),
        category: or_default(field(columns.category), DEFAULT_CATEGORY),
        paid: is_truthy(field(columns.paid).trim()),
        external_id: or_default(field(columns.external_id), ""),
        description: columns
            .description
            .map(|index| field(index).to_string())
            .unwrap_or_default(),
        status,
    })
}

/// `value` as written, or `default` when it is blank
fn or_default(value: &str, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

/// `1`, `true`, `yes` and `y` in any case
fn is_truthy(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "y")
}
