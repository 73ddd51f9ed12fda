//! Billing-cycle statistics command

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use fils_core::{compute_stats, cycle_for};

use super::open_db;

pub fn cmd_stats(db_path: &Path, json: bool) -> Result<()> {
    let db = open_db(db_path)?;

    let today = Utc::now().date_naive();
    let cycle = cycle_for(today);
    let transactions = db
        .transactions_for_cycle(&cycle)
        .context("Failed to load cycle transactions")?;

    let stats = compute_stats(&cycle, &transactions, today);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        // The message is already formatted for human consumption
        println!("{}", stats.message);
    }

    Ok(())
}
