//! CSV import
//!
//! Accepts both a plain `Date,Description,Amount (AED),Category` file
//! and this application's own export format. Structural rows from the
//! export (cycle separators, Subtotal, blank spacers, Grand Total) are
//! skipped silently; a data row with a malformed amount is reported as
//! a per-row error without aborting the rest of the file.

use std::io::Read;

use serde::Serialize;
use tracing::{debug, info};

use crate::cycle::{cycle_for, parse_date_or_today};
use crate::db::{Database, InsertOutcome};
use crate::error::Result;
use crate::models::{Category, NewTransaction};

/// Outcome of an import run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportOutcome {
    pub imported: i64,
    pub duplicates: i64,
    pub errors: Vec<String>,
}

/// True for rows the exporter writes around the actual data:
/// header, cycle separators, subtotal and grand-total lines, spacers.
fn is_structural(date: &str, description: &str, amount: &str, category: &str) -> bool {
    if date == "Date" {
        return true;
    }
    if description == "Subtotal" || description == "Grand Total" {
        return true;
    }
    // Separator rows carry the cycle label in the date column only;
    // blank spacers carry nothing at all
    description.is_empty() || amount.is_empty() || category.is_empty()
}

/// Import transactions from CSV, inserting row by row.
///
/// Rows inserted before a storage failure stay inserted; the caller
/// sees the error and the user can re-run the import, with duplicate
/// detection absorbing the overlap. Row numbers in error messages are
/// 1-based over the whole file, header included.
pub fn import_csv<R: Read>(db: &Database, reader: R) -> Result<ImportOutcome> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut outcome = ImportOutcome::default();

    for (i, record) in rdr.records().enumerate() {
        let row = i + 1;
        let record = record?;

        let date_raw = record.get(0).unwrap_or("").trim();
        let description = record.get(1).unwrap_or("").trim();
        let amount_raw = record.get(2).unwrap_or("").trim();
        let category_raw = record.get(3).unwrap_or("").trim();

        if is_structural(date_raw, description, amount_raw, category_raw) {
            debug!(row, "skipping structural row");
            continue;
        }

        let amount: f64 = match amount_raw.parse() {
            Ok(v) => v,
            Err(_) => {
                outcome
                    .errors
                    .push(format!("row {}: invalid amount '{}'", row, amount_raw));
                continue;
            }
        };

        let date = parse_date_or_today(date_raw);
        let tx = NewTransaction {
            description: description.to_string(),
            amount,
            date,
            category: Category::from_label(category_raw),
            confidence: 100,
            billing_cycle: cycle_for(date),
            created_at: chrono::Utc::now(),
        };

        match db.insert_transaction(&tx)? {
            InsertOutcome::Inserted(_) => outcome.imported += 1,
            InsertOutcome::Duplicate(_) => outcome.duplicates += 1,
        }
    }

    info!(
        imported = outcome.imported,
        duplicates = outcome.duplicates,
        errors = outcome.errors.len(),
        "CSV import finished"
    );
    Ok(outcome)
}
