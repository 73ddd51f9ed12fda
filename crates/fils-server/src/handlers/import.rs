//! CSV import handler

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::info;

use fils_core::{import_csv, ImportOutcome};

use crate::{AppError, AppState};

/// POST /import - upload a CSV of transactions
///
/// Expects a multipart form with a `file` field. Accepts both plain
/// `Date,Description,Amount (AED),Category` files and this server's
/// own export format; structural export rows are skipped and rows that
/// fail to parse are reported per row without aborting the import.
pub async fn import_transactions(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ImportOutcome>, AppError> {
    let mut file_data: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(&format!("Failed to read form field: {}", e)))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|_| AppError::bad_request("Failed to read file data"))?;
            file_data = Some(bytes.to_vec());
        }
    }

    let data = file_data.ok_or_else(|| AppError::bad_request("No file uploaded"))?;

    info!(bytes = data.len(), "importing uploaded CSV");
    let outcome = import_csv(&state.db, data.as_slice())?;

    Ok(Json(outcome))
}
