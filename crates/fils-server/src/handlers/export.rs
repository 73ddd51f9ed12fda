//! CSV export handler

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Response, StatusCode},
};
use tracing::info;

use fils_core::export_csv;

use crate::{AppError, AppState};

/// GET /export - download every transaction as a CSV attachment
///
/// Transactions are grouped by billing cycle with per-cycle subtotals
/// and a grand total; an empty database still yields a valid file with
/// just the header and a zero grand total.
pub async fn export_transactions(
    State(state): State<Arc<AppState>>,
) -> Result<Response<Body>, AppError> {
    let transactions = state.db.all_transactions()?;
    let csv = export_csv(&transactions)?;

    info!(transactions = transactions.len(), "exporting CSV");

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/csv; charset=utf-8")
        .header(
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"transactions.csv\"",
        )
        .body(Body::from(csv))
        .map_err(|e| AppError::internal(&e.to_string()))
}
