//! Fils Core Library
//!
//! Shared functionality for the Fils expense tracker:
//! - Billing-cycle calculator (23rd-to-22nd monthly windows)
//! - SQLite transaction store with duplicate detection
//! - Per-cycle statistics aggregation
//! - CSV export grouped by billing cycle with subtotals
//! - CSV import that round-trips the exporter's own format
//! - Pluggable LLM extraction backends (OpenAI, mock)

pub mod ai;
pub mod cycle;
pub mod db;
pub mod error;
pub mod export;
pub mod import;
pub mod models;
pub mod stats;

pub use ai::{ExtractedTransaction, ExtractionBackend, ExtractorClient, MockBackend, OpenAiBackend};
pub use cycle::{cycle_for, cycle_for_str, parse_date_or_today};
pub use db::{Database, InsertOutcome};
pub use error::{Error, Result};
pub use export::export_csv;
pub use import::{import_csv, ImportOutcome};
pub use models::{
    Category, CategoryStats, NewTransaction, StatsResponse, Transaction, TransactionSummary,
    TransactionUpdate,
};
pub use stats::compute_stats;
