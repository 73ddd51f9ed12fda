//! Mock backend for testing
//!
//! Returns canned extraction results without talking to any API.

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::models::Category;

use super::{ExtractedTransaction, ExtractionBackend};

/// Mock extraction backend
///
/// By default it returns one predictable transaction for any non-empty
/// input. Tests can pin the exact output with `with_transactions`, or
/// force the upstream-failure path with `failing`.
#[derive(Clone)]
pub struct MockBackend {
    healthy: bool,
    fail: bool,
    transactions: Option<Vec<ExtractedTransaction>>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    /// Create a new mock backend (healthy by default)
    pub fn new() -> Self {
        Self {
            healthy: true,
            fail: false,
            transactions: None,
        }
    }

    /// Mock that always returns exactly these transactions
    pub fn with_transactions(transactions: Vec<ExtractedTransaction>) -> Self {
        Self {
            healthy: true,
            fail: false,
            transactions: Some(transactions),
        }
    }

    /// Mock whose extraction always fails
    pub fn failing() -> Self {
        Self {
            healthy: false,
            fail: true,
            transactions: None,
        }
    }
}

#[async_trait]
impl ExtractionBackend for MockBackend {
    async fn extract_transactions(&self, text: &str) -> Result<Vec<ExtractedTransaction>> {
        if self.fail {
            return Err(Error::Upstream("mock extraction failure".into()));
        }

        if let Some(ref canned) = self.transactions {
            return Ok(canned.clone());
        }

        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        Ok(vec![ExtractedTransaction {
            date: "2026-02-24".to_string(),
            description: "Mock Merchant".to_string(),
            amount: 42.0,
            category: Category::Shopping,
            confidence: 90,
        }])
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn model(&self) -> &str {
        "mock"
    }
}
