//! Invoice status maintenance

use chrono::NaiveDate;
use tracing::info;

use crate::invoice::{Invoice, InvoiceStatus};

/// Mark unpaid invoices dated before `today` as overdue.
///
/// Returns how many invoices changed status; running it twice on the same day
/// changes nothing the second time.
pub fn mark_overdue(invoices: &mut [Invoice], today: NaiveDate) -> usize {
    let mut updated = 0;

    for invoice in invoices
        .iter_mut()
        .filter(|i| i.is_past_due(today) && i.status != InvoiceStatus::Overdue)
    {
        invoice.status = InvoiceStatus::Overdue;
        updated += 1;
    }

    info!(updated, %today, "marked overdue invoices");
    updated
}
