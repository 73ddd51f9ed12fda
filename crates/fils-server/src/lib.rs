//! Fils REST API server
//!
//! Serves the transaction API and the dashboard UI:
//! - `GET    /health` - health check
//! - `POST   /transaction` - extract and log transactions from free-form text
//! - `PUT    /transaction/:id` - update a transaction
//! - `DELETE /transaction/:id` - delete a transaction
//! - `GET    /stats` - current billing-cycle statistics
//! - `GET    /export` - download all transactions as CSV
//! - `POST   /import` - upload a CSV of transactions
//!
//! Anything else falls through to the static dashboard directory when
//! one is configured.

pub mod handlers;

#[cfg(test)]
mod tests;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{error, info};

use fils_core::{Database, ExtractorClient};

/// Shared application state
pub struct AppState {
    pub db: Database,
    /// None when no extraction backend is configured; POST /transaction
    /// then reports the missing backend instead of extracting.
    pub extractor: Option<ExtractorClient>,
}

/// Build the application router.
///
/// `static_dir` is served for any path no API route claims, so the
/// dashboard lives at `/` next to the JSON endpoints.
pub fn create_router(
    db: Database,
    static_dir: Option<PathBuf>,
    extractor: Option<ExtractorClient>,
) -> Router {
    let state = Arc::new(AppState { db, extractor });

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(tower_http::cors::Any)
        .allow_origin(tower_http::cors::Any);

    let router = Router::new()
        .route("/health", get(handlers::health))
        .route("/transaction", post(handlers::log_transaction))
        .route(
            "/transaction/:id",
            put(handlers::update_transaction).delete(handlers::delete_transaction),
        )
        .route("/stats", get(handlers::get_stats))
        .route("/export", get(handlers::export_transactions))
        .route("/import", post(handlers::import_transactions))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    }
}

/// Bind and serve until the process is stopped
pub async fn serve(
    db: Database,
    host: &str,
    port: u16,
    static_dir: Option<PathBuf>,
    extractor: Option<ExtractorClient>,
) -> anyhow::Result<()> {
    let app = create_router(db, static_dir, extractor);
    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    info!("Server ready at http://{}:{}", host, port);
    axum::serve(listener, app).await?;
    Ok(())
}

/// API error carrying an HTTP status and a client-facing message
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: &str) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, "{}", self.message);
        }
        let body = Json(serde_json::json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

impl From<fils_core::Error> for AppError {
    fn from(err: fils_core::Error) -> Self {
        use fils_core::Error;
        match &err {
            Error::NotFound(_) => Self::new(StatusCode::NOT_FOUND, err.to_string()),
            Error::Validation(_) => Self::new(StatusCode::BAD_REQUEST, err.to_string()),
            Error::Upstream(_) => Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            _ => {
                error!(error = %err, "request failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "An internal error occurred")
            }
        }
    }
}
