//! CSV invoice export

use csv::Writer;
use std::io::Write;
use tracing::debug;

use crate::error::Result;
use crate::invoice::Invoice;

/// Header of exported files, readable by [`crate::import_invoices`]
pub const EXPORT_COLUMNS: [&str; 9] = [
    "date",
    "amount",
    "client",
    "project",
    "category",
    "paid",
    "external_id",
    "description",
    "status",
];

/// Write `invoices` as CSV with `paid` rendered as `True` or `False` and
/// `status` as `open` or `overdue`
pub fn export_invoices<W: Write>(writer: W, invoices: &[Invoice]) -> Result<()> {
    let mut csv_writer = Writer::from_writer(writer);
    csv_writer.write_record(EXPORT_COLUMNS)?;

    for invoice in invoices {
        let date = invoice.date.format("%Y-%m-%d").to_string();
        let amount = invoice.amount.to_string();
        let paid = if invoice.paid { "True" } else { "False" };
        let status = invoice.status.to_string();

        csv_writer.write_record([
            date.as_str(),
            amount.as_str(),
            invoice.client.as_str(),
            invoice.project.as_str(),
            invoice.category.as_str(),
            paid,
            invoice.external_id.as_str(),
            invoice.description.as_str(),
            status.as_str(),
        ])?;
    }

    csv_writer.flush()?;
    debug!(rows = invoices.len(), "exported invoices");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    #[test]
    fn test_export_layout() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let invoice = Invoice::new(date, Decimal::new(10050, 2))
            .with_client("Client A")
            .with_project("Proj")
            .with_category("Cat")
            .with_paid(true)
            .with_external_id("ID1")
            .with_description("Desc, with comma");

        let mut buffer = Vec::new();
        export_invoices(&mut buffer, &[invoice]).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("date,amount,client,project,category,paid,external_id,description,status")
        );
        assert_eq!(
            lines.next(),
            Some("2025-01-01,100.50,Client A,Proj,Cat,True,ID1,\"Desc, with comma\",open")
        );
        assert_eq!(lines.next(), None);
    }
}
