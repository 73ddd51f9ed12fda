//! OpenAI backend implementation
//!
//! Sends free-form text to the chat completions API with a prompt that
//! extracts UAE transactions and converts every amount to AED.
//!
//! # Configuration
//!
//! Environment variables:
//! - `OPENAI_API_KEY`: API key (required)
//! - `OPENAI_MODEL`: Model name (default: gpt-4o-mini)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

use super::{ExtractedTransaction, ExtractionBackend};

const API_BASE: &str = "https://api.openai.com";

const SYSTEM_PROMPT: &str = r#"You are a financial transaction parser for UAE-based transactions. Extract transaction details from SMS messages and convert ALL amounts to AED (UAE Dirham).

Parse the following message which may contain ONE or MORE transaction SMS messages and return ONLY a valid JSON array of transaction objects.

Each transaction object must have these exact fields:
- date: transaction date in YYYY-MM-DD format (infer current year if missing, use today's date if no date mentioned)
- description: merchant or transaction description
- amount: numeric value CONVERTED TO AED as a number (positive for expenses, negative for income/deposits)
- category: exactly ONE of these categories: "Food & Dining", "Transport", "Shopping", "Bills & Utilities", "Entertainment", "Health & Fitness", "Travel", "Cash Withdrawal", "Income/Transfer", "Unknown"
- confidence: number from 0-100

Currency Conversion Rules:
- If amount is in AED: keep as-is
- If amount is in USD: multiply by 3.67
- If amount is in EUR: multiply by 4.00
- If amount is in GBP: multiply by 4.70
- If amount is in SAR: multiply by 0.98
- Other currencies: use approximate current rates to convert to AED
- ALWAYS return amount in AED only

Parsing Rules:
- Return an ARRAY of transaction objects, even if there's only one transaction
- Only use "Unknown" category if confidence < 70
- Infer current year if not specified in SMS
- Extract numeric amount only, remove currency symbols
- Be conservative with category assignment
- Return ONLY the JSON array, no other text
- Each SMS in the message should be parsed as a separate transaction

Example response for multiple transactions:
[
  {
    "date": "2026-01-25",
    "description": "Starbucks Dubai Mall",
    "amount": 25.50,
    "category": "Food & Dining",
    "confidence": 95
  },
  {
    "date": "2026-01-25",
    "description": "Careem Ride",
    "amount": 35.00,
    "category": "Transport",
    "confidence": 98
  }
]"#;

/// OpenAI extraction backend
#[derive(Clone)]
pub struct OpenAiBackend {
    http_client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

impl OpenAiBackend {
    /// Create a new OpenAI backend
    pub fn new(api_key: &str, model: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: API_BASE.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    /// Point the backend at a different base URL (local stand-ins, proxies)
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    async fn chat_completion(&self, text: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: text.to_string(),
                },
            ],
            temperature: 0.3,
            max_tokens: 1500,
        };

        let response = self
            .http_client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!(
                "OpenAI API error {}: {}",
                status, body
            )));
        }

        let chat_response: ChatCompletionResponse = response.json().await?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| Error::Upstream("No response from OpenAI API".into()))
    }
}

/// Strip a Markdown code fence if the model wrapped its JSON in one
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the language tag on the opening fence line
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.trim_end_matches("```").trim()
}

#[async_trait]
impl ExtractionBackend for OpenAiBackend {
    async fn extract_transactions(&self, text: &str) -> Result<Vec<ExtractedTransaction>> {
        debug!(model = %self.model, chars = text.len(), "requesting extraction");
        let content = self.chat_completion(text).await?;

        let json = strip_code_fence(&content);
        let transactions: Vec<ExtractedTransaction> =
            serde_json::from_str(json).map_err(|e| {
                warn!(error = %e, "extraction output was not a JSON array");
                Error::Upstream(format!(
                    "failed to parse transactions from model output: {} (content: {})",
                    e, content
                ))
            })?;

        debug!(count = transactions.len(), "extraction complete");
        Ok(transactions)
    }

    async fn health_check(&self) -> bool {
        self.http_client
            .get(format!("{}/v1/models", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
