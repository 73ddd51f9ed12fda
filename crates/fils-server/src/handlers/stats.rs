//! Billing-cycle statistics handler

use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::Utc;
use tracing::info;

use fils_core::{compute_stats, cycle_for, StatsResponse};

use crate::{AppError, AppState};

/// GET /stats - spending breakdown for the current billing cycle
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatsResponse>, AppError> {
    let today = Utc::now().date_naive();
    let cycle = cycle_for(today);

    let transactions = state.db.transactions_for_cycle(&cycle)?;
    let stats = compute_stats(&cycle, &transactions, today);

    info!(
        cycle = %stats.cycle,
        count = stats.count,
        total = stats.total,
        "returning stats"
    );
    Ok(Json(stats))
}
