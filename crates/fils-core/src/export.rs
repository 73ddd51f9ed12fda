//! CSV export grouped by billing cycle
//!
//! The output is a single spreadsheet-friendly document: a header row,
//! then per cycle a separator row, the cycle's transactions, a subtotal
//! row and a blank spacer, and finally a grand-total row. Subtotals and
//! the grand total exclude Income/Transfer; the transaction rows still
//! list income so the export is a complete record.
//!
//! The importer reads this same format back, so every structural row
//! written here has a matching skip rule there.

use csv::Writer;

use crate::error::{Error, Result};
use crate::models::Transaction;

/// Column header row
pub const CSV_HEADER: [&str; 4] = ["Date", "Description", "Amount (AED)", "Category"];

/// Render all transactions as cycle-grouped CSV.
///
/// `transactions` must be ordered newest first across all cycles; the
/// cycle sections come out in first-seen order over that list, so the
/// most recent cycle leads.
pub fn export_csv(transactions: &[Transaction]) -> Result<String> {
    let mut wtr = Writer::from_writer(Vec::new());
    wtr.write_record(CSV_HEADER)?;

    // Cycle labels in first-seen order over the date-sorted input
    let mut cycles: Vec<&str> = Vec::new();
    for tx in transactions {
        if !cycles.iter().any(|c| *c == tx.billing_cycle) {
            cycles.push(&tx.billing_cycle);
        }
    }

    let mut grand_total = 0.0;
    for cycle in cycles {
        wtr.write_record([format!("--- {} ---", cycle), String::new(), String::new(), String::new()])?;

        let mut subtotal = 0.0;
        for tx in transactions.iter().filter(|t| t.billing_cycle == cycle) {
            wtr.write_record([
                tx.date.to_string(),
                tx.description.clone(),
                format!("{:.2}", tx.amount),
                tx.category.to_string(),
            ])?;
            if !tx.category.is_income() {
                subtotal += tx.amount;
            }
        }
        grand_total += subtotal;

        wtr.write_record(["", "Subtotal", format!("{:.2}", subtotal).as_str(), ""])?;
        wtr.write_record(["", "", "", ""])?;
    }

    wtr.write_record(["", "Grand Total", format!("{:.2}", grand_total).as_str(), ""])?;

    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes).map_err(|e| Error::Validation(format!("non-UTF-8 CSV output: {}", e)))
}
