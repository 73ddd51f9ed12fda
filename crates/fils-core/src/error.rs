//! Error types for Fils

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Database pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Transaction not found: {0}")]
    NotFound(i64),

    #[error("Invalid data: {0}")]
    Validation(String),

    #[error("Extraction service error: {0}")]
    Upstream(String),
}

pub type Result<T> = std::result::Result<T, Error>;
