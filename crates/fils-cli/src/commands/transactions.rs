//! Transaction listing command

use std::path::Path;

use anyhow::{Context, Result};

use super::{open_db, truncate};

pub fn cmd_transactions_list(db_path: &Path, limit: usize) -> Result<()> {
    let db = open_db(db_path)?;
    let transactions = db.all_transactions().context("Failed to load transactions")?;

    if transactions.is_empty() {
        println!("No transactions found. Import some with:");
        println!("  fils import --file transactions.csv");
        return Ok(());
    }

    println!();
    println!("📝 Recent Transactions");
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in transactions.iter().take(limit) {
        // Positive amounts are spend, negative are income
        let amount_str = if tx.amount < 0.0 {
            format!("\x1b[32m+{:.2} AED\x1b[0m", tx.amount.abs())
        } else {
            format!("\x1b[31m{:.2} AED\x1b[0m", tx.amount)
        };

        println!(
            "   {} │ {:>12} │ {} {}",
            tx.date,
            amount_str,
            tx.category.emoji(),
            truncate(&tx.description, 40)
        );
    }

    Ok(())
}
