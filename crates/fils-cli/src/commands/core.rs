//! Init command and shared utilities

use std::path::Path;

use anyhow::{Context, Result};
use fils_core::Database;
use tracing::info;

/// Open the database, creating the schema if needed
pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path.to_string_lossy();
    Database::new(&path_str).context("Failed to open database")
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path)?;
    let count = db.count_transactions().context("Failed to query database")?;
    info!(path = %db_path.display(), transactions = count, "database ready");
    println!("   Transactions: {}", count);

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Import transactions: fils import --file transactions.csv");
    println!("  2. Start the dashboard: fils serve");

    Ok(())
}
