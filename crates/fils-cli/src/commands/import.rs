//! CSV import command

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use fils_core::import_csv;
use tracing::debug;

use super::open_db;

pub fn cmd_import(db_path: &Path, file: &Path) -> Result<()> {
    println!("📥 Importing {}...", file.display());

    let db = open_db(db_path)?;
    debug!(file = %file.display(), "reading CSV file");
    let reader = File::open(file)
        .with_context(|| format!("Failed to open {}", file.display()))?;

    let outcome = import_csv(&db, reader).context("Import failed")?;

    println!("   Imported:   {}", outcome.imported);
    println!("   Duplicates: {}", outcome.duplicates);

    if outcome.errors.is_empty() {
        println!("✅ Import complete");
    } else {
        println!("   Errors:     {}", outcome.errors.len());
        for err in &outcome.errors {
            println!("     - {}", err);
        }
        println!("⚠️  Import finished with errors");
    }

    Ok(())
}
