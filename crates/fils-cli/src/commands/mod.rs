//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Init command and shared utilities (open_db)
//! - `export` - CSV export command
//! - `import` - CSV import command
//! - `serve` - Web server command
//! - `stats` - Billing-cycle statistics command
//! - `transactions` - Transaction listing command

pub mod core;
pub mod export;
pub mod import;
pub mod serve;
pub mod stats;
pub mod transactions;

// Re-export command functions for main.rs
pub use core::*;
pub use export::*;
pub use import::*;
pub use serve::*;
pub use stats::*;
pub use transactions::*;

/// Truncate a string to a maximum byte length, adding "..." if truncated.
/// Descriptions are free text, so the cut must land on a char boundary.
pub fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let cut = max.saturating_sub(3);
    let end = s
        .char_indices()
        .take_while(|(i, _)| *i <= cut)
        .last()
        .map(|(i, _)| i)
        .unwrap_or(0);
    format!("{}...", &s[..end])
}
