//! HTTP request handlers organized by domain

pub mod export;
pub mod import;
pub mod stats;
pub mod transactions;

// Re-export all handlers for use in router
pub use export::*;
pub use import::*;
pub use stats::*;
pub use transactions::*;
