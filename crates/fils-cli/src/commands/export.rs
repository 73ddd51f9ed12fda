//! CSV export command

use std::path::Path;

use anyhow::{Context, Result};
use fils_core::export_csv;
use tracing::debug;

use super::open_db;

pub fn cmd_export(db_path: &Path, output: Option<&Path>) -> Result<()> {
    let db = open_db(db_path)?;
    let transactions = db.all_transactions().context("Failed to load transactions")?;
    debug!(transactions = transactions.len(), "rendering CSV export");
    let csv = export_csv(&transactions).context("Export failed")?;

    match output {
        Some(path) => {
            std::fs::write(path, &csv)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "✅ Exported {} transaction(s) to {}",
                transactions.len(),
                path.display()
            );
        }
        None => print!("{}", csv),
    }

    Ok(())
}
