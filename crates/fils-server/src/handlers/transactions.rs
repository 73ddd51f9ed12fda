//! Transaction logging, update, and delete handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use fils_core::{
    cycle_for, parse_date_or_today, ExtractionBackend, InsertOutcome, NewTransaction, Transaction,
    TransactionUpdate,
};

use crate::{AppError, AppState};

/// Request body for POST /transaction
#[derive(Debug, Deserialize)]
pub struct TransactionRequest {
    #[serde(default)]
    pub text: String,
}

/// Response body for POST /transaction
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    pub success: bool,
    pub message: String,
    pub count: usize,
    pub total: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub transactions: Vec<Transaction>,
}

/// GET /health - liveness check
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "time": Utc::now().to_rfc3339(),
    }))
}

/// POST /transaction - extract transactions from free-form text and save them
pub async fn log_transaction(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TransactionRequest>,
) -> Result<Json<TransactionResponse>, AppError> {
    if req.text.trim().is_empty() {
        return Err(AppError::bad_request("Text field is required"));
    }

    let extractor = state
        .extractor
        .as_ref()
        .ok_or_else(|| AppError::internal("No extraction backend configured"))?;

    let extracted = extractor
        .extract_transactions(&req.text)
        .await
        .map_err(|e| {
            error!(error = %e, "extraction failed");
            AppError::internal("Failed to parse transactions")
        })?;

    info!(count = extracted.len(), "extraction returned transactions");

    if extracted.is_empty() {
        return Ok(Json(TransactionResponse {
            success: false,
            message: "No transactions found in the provided text".to_string(),
            count: 0,
            total: 0.0,
            transactions: Vec::new(),
        }));
    }

    let mut saved: Vec<Transaction> = Vec::new();
    let mut total = 0.0;

    for ext in &extracted {
        let date = parse_date_or_today(&ext.date);
        let tx = NewTransaction {
            description: ext.description.clone(),
            amount: ext.amount,
            date,
            category: ext.category,
            confidence: ext.confidence,
            billing_cycle: cycle_for(date),
            created_at: Utc::now(),
        };

        let id = match state.db.insert_transaction(&tx) {
            Ok(InsertOutcome::Inserted(id)) => id,
            Ok(InsertOutcome::Duplicate(id)) => {
                info!(id, description = %tx.description, "skipping duplicate transaction");
                continue;
            }
            Err(e) => {
                // One bad row must not lose the rest of the batch
                error!(error = %e, "failed to save transaction");
                continue;
            }
        };

        match state.db.get_transaction(id)? {
            Some(stored) => {
                total += stored.amount;
                saved.push(stored);
            }
            None => warn!(id, "saved transaction disappeared before readback"),
        }
    }

    info!(
        saved = saved.len(),
        extracted = extracted.len(),
        total,
        "transaction batch stored"
    );

    let plural = if saved.len() == 1 { "" } else { "s" };
    let mut message = format!("✅ Added {} transaction{}!\n\n", saved.len(), plural);
    for (i, tx) in saved.iter().enumerate() {
        message.push_str(&format!("{}. {}\n", i + 1, tx.description));
        message.push_str(&format!("   💰 Amount: {:.2} AED\n", tx.amount));
        message.push_str(&format!(
            "   📁 Category: {} {} ({}% confidence)\n",
            tx.category.emoji(),
            tx.category,
            tx.confidence
        ));
        message.push_str(&format!("   📅 Cycle: {}\n\n", tx.billing_cycle));
    }
    message.push_str(&format!("━━━━━━━━━━━━━━━\n💵 Total: {:.2} AED", total));

    Ok(Json(TransactionResponse {
        success: true,
        message,
        count: saved.len(),
        total,
        transactions: saved,
    }))
}

/// PUT /transaction/:id - rewrite an existing transaction
///
/// The billing cycle is recomputed from the submitted date; clients
/// never set it directly.
pub async fn update_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(update): Json<TransactionUpdate>,
) -> Result<Json<serde_json::Value>, AppError> {
    let cycle = cycle_for(update.date);
    state.db.update_transaction(id, &update, &cycle)?;

    info!(id, cycle = %cycle, "transaction updated");
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Transaction updated successfully",
    })))
}

/// DELETE /transaction/:id
pub async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.db.delete_transaction(id)?;

    info!(id, "transaction deleted");
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Transaction deleted successfully",
    })))
}
