//! Pluggable LLM extraction backends
//!
//! Free-form text (bank SMS messages, pasted notifications) goes in,
//! structured transactions come out.
//!
//! # Architecture
//!
//! - `ExtractionBackend` trait: the interface every backend implements
//! - `ExtractorClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backend implementations: `OpenAiBackend`, `MockBackend`
//!
//! # Configuration
//!
//! Environment variables:
//! - `OPENAI_API_KEY`: API key (required for the OpenAI backend)
//! - `OPENAI_MODEL`: Model name (default: gpt-4o-mini)

mod mock;
mod openai;

pub use mock::MockBackend;
pub use openai::OpenAiBackend;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::Result;
use crate::models::Category;

/// A transaction as extracted from free-form text, before enrichment.
///
/// The date stays a string here: model output is not guaranteed valid
/// and the ingestion layer owns the fallback behavior.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractedTransaction {
    pub date: String,
    pub description: String,
    /// Already converted to AED by the extraction prompt
    pub amount: f64,
    pub category: Category,
    pub confidence: i64,
}

/// Trait defining the interface for extraction backends
///
/// Backends must be Send + Sync to allow use across async tasks.
#[async_trait]
pub trait ExtractionBackend: Send + Sync {
    /// Extract zero or more transactions from free-form text
    async fn extract_transactions(&self, text: &str) -> Result<Vec<ExtractedTransaction>>;

    /// Check if the backend is available
    async fn health_check(&self) -> bool;

    /// Get the model name (for logging)
    fn model(&self) -> &str;
}

/// Concrete extraction client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum ExtractorClient {
    /// OpenAI chat-completions backend
    OpenAi(OpenAiBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl ExtractorClient {
    /// Create an extraction client from environment variables.
    ///
    /// Returns None when `OPENAI_API_KEY` is not set; the server then
    /// runs without the extraction endpoint's LLM path.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let model =
            std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());
        Some(ExtractorClient::OpenAi(OpenAiBackend::new(&api_key, &model)))
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        ExtractorClient::Mock(MockBackend::new())
    }
}

#[async_trait]
impl ExtractionBackend for ExtractorClient {
    async fn extract_transactions(&self, text: &str) -> Result<Vec<ExtractedTransaction>> {
        match self {
            ExtractorClient::OpenAi(b) => b.extract_transactions(text).await,
            ExtractorClient::Mock(b) => b.extract_transactions(text).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            ExtractorClient::OpenAi(b) => b.health_check().await,
            ExtractorClient::Mock(b) => b.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            ExtractorClient::OpenAi(b) => b.model(),
            ExtractorClient::Mock(b) => b.model(),
        }
    }
}
