//! Invoice records and the in-memory ledger

use chrono::NaiveDate;
use forecast_engine::{forecast_revenue, ForecastConfig, ForecastResult, Transaction};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{LedgerError, Result};

/// Default client name for rows without one
pub const DEFAULT_CLIENT: &str = "Unknown";
/// Default project title for rows without one
pub const DEFAULT_PROJECT: &str = "Default project";
/// Default category name for rows without one
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Collection state of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Issued and not past due
    #[default]
    Open,
    /// Unpaid after its invoice date
    Overdue,
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvoiceStatus::Open => write!(f, "open"),
            InvoiceStatus::Overdue => write!(f, "overdue"),
        }
    }
}

impl FromStr for InvoiceStatus {
    type Err = LedgerError;

    /// Parse `open` or `overdue` in any case
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "open" => Ok(InvoiceStatus::Open),
            "overdue" => Ok(InvoiceStatus::Overdue),
            _ => Err(LedgerError::InvalidStatus(s.to_string())),
        }
    }
}

/// A single invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub client: String,
    pub project: String,
    pub category: String,
    pub paid: bool,
    /// Identifier from the source system, empty when unknown
    pub external_id: String,
    pub description: String,
    pub status: InvoiceStatus,
}

impl Invoice {
    /// Create an open invoice with default client, project and category
    pub fn new(date: NaiveDate, amount: Decimal) -> Self {
        Self {
            date,
            amount,
            client: DEFAULT_CLIENT.to_string(),
            project: DEFAULT_PROJECT.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
            paid: false,
            external_id: String::new(),
            description: String::new(),
            status: InvoiceStatus::Open,
        }
    }

    /// Set the client name
    pub fn with_client(mut self, client: &str) -> Self {
        self.client = client.to_string();
        self
    }

    /// Set the project title
    pub fn with_project(mut self, project: &str) -> Self {
        self.project = project.to_string();
        self
    }

    /// Set the category name
    pub fn with_category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    /// Set the paid flag
    pub fn with_paid(mut self, paid: bool) -> Self {
        self.paid = paid;
        self
    }

    /// Set the external identifier
    pub fn with_external_id(mut self, external_id: &str) -> Self {
        self.external_id = external_id.to_string();
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Set the collection status
    pub fn with_status(mut self, status: InvoiceStatus) -> Self {
        self.status = status;
        self
    }

    /// Whether the invoice is unpaid and dated before `today`
    pub fn is_past_due(&self, today: NaiveDate) -> bool {
        !self.paid && self.date < today
    }
}

impl Transaction for Invoice {
    fn occurred_on(&self) -> NaiveDate {
        self.date
    }

    fn amount(&self) -> Decimal {
        self.amount
    }
}

/// Invoices of one owner, unique by non-empty external id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    invoices: Vec<Invoice>,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger holding `invoices` as given
    pub fn from_invoices(invoices: Vec<Invoice>) -> Self {
        Self { invoices }
    }

    /// Get the invoices
    pub fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    /// Mutable access for status updates
    pub fn invoices_mut(&mut self) -> &mut [Invoice] {
        &mut self.invoices
    }

    /// Number of invoices
    pub fn len(&self) -> usize {
        self.invoices.len()
    }

    /// Whether the ledger holds no invoices
    pub fn is_empty(&self) -> bool {
        self.invoices.is_empty()
    }

    /// Whether an invoice with this external id is already recorded
    pub fn contains_external_id(&self, external_id: &str) -> bool {
        !external_id.is_empty() && self.invoices.iter().any(|i| i.external_id == external_id)
    }

    /// Add an invoice without duplicate checks
    pub fn push(&mut self, invoice: Invoice) {
        self.invoices.push(invoice);
    }

    /// Distinct client names in first-seen order
    pub fn clients(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.invoices
            .iter()
            .map(|i| i.client.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// Sum of unpaid amounts
    pub fn outstanding(&self) -> Decimal {
        self.invoices
            .iter()
            .filter(|i| !i.paid)
            .map(|i| i.amount)
            .sum()
    }

    /// Forecast monthly revenue from every invoice in the ledger
    pub fn forecast(&self, config: &ForecastConfig) -> Result<ForecastResult> {
        Ok(forecast_revenue(&self.invoices, config)?)
    }
}
