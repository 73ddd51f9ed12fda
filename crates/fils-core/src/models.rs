//! Domain models for Fils

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Spending categories assigned by the extraction service
///
/// This is a closed enumeration: labels the extraction service or a CSV file
/// produce that don't match any known category fall back to `Unknown`
/// explicitly rather than being stored as free-form text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    FoodDining,
    Transport,
    Shopping,
    BillsUtilities,
    Entertainment,
    HealthFitness,
    Travel,
    CashWithdrawal,
    IncomeTransfer,
    Unknown,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FoodDining => "Food & Dining",
            Self::Transport => "Transport",
            Self::Shopping => "Shopping",
            Self::BillsUtilities => "Bills & Utilities",
            Self::Entertainment => "Entertainment",
            Self::HealthFitness => "Health & Fitness",
            Self::Travel => "Travel",
            Self::CashWithdrawal => "Cash Withdrawal",
            Self::IncomeTransfer => "Income/Transfer",
            Self::Unknown => "Unknown",
        }
    }

    /// Parse a category label, falling back to `Unknown` for anything
    /// unrecognized (extraction output is not guaranteed well-behaved).
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Food & Dining" => Self::FoodDining,
            "Transport" => Self::Transport,
            "Shopping" => Self::Shopping,
            "Bills & Utilities" => Self::BillsUtilities,
            "Entertainment" => Self::Entertainment,
            "Health & Fitness" => Self::HealthFitness,
            "Travel" => Self::Travel,
            "Cash Withdrawal" => Self::CashWithdrawal,
            "Income/Transfer" => Self::IncomeTransfer,
            _ => Self::Unknown,
        }
    }

    /// Emoji glyph for dashboard display
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::FoodDining => "🍔",
            Self::Transport => "🚗",
            Self::Shopping => "🛍️",
            Self::BillsUtilities => "💳",
            Self::Entertainment => "🎬",
            Self::HealthFitness => "💪",
            Self::Travel => "✈️",
            Self::CashWithdrawal => "💵",
            Self::IncomeTransfer => "💰",
            Self::Unknown => "❓",
        }
    }

    /// Whether this category counts as income rather than spend.
    /// Income is excluded from cycle totals and subtotals.
    pub fn is_income(&self) -> bool {
        matches!(self, Self::IncomeTransfer)
    }

    /// All categories, in display order
    pub fn all() -> &'static [Category] {
        &[
            Self::FoodDining,
            Self::Transport,
            Self::Shopping,
            Self::BillsUtilities,
            Self::Entertainment,
            Self::HealthFitness,
            Self::Travel,
            Self::CashWithdrawal,
            Self::IncomeTransfer,
            Self::Unknown,
        ]
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Self::from_label(&s)
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.as_str().to_string()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A persisted transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub description: String,
    /// Amount in AED. Positive = expense, negative = income/refund
    /// (convention, not enforced).
    pub amount: f64,
    pub date: NaiveDate,
    pub category: Category,
    /// Extraction confidence 0-100. Imported rows default to 100.
    pub confidence: i64,
    #[serde(rename = "billingCycle")]
    pub billing_cycle: String,
    /// Ingestion timestamp, used to break date ties when ordering
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// A transaction about to be inserted (no id yet)
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub category: Category,
    pub confidence: i64,
    pub billing_cycle: String,
    pub created_at: DateTime<Utc>,
}

/// Fields editable via PUT /transaction/:id
///
/// The billing cycle is never taken from the client; it is recomputed
/// from `date`.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionUpdate {
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub category: Category,
}

/// Per-category breakdown within a billing cycle
#[derive(Debug, Clone, Serialize)]
pub struct CategoryStats {
    pub category: Category,
    pub emoji: String,
    pub total: f64,
    pub count: i64,
    pub transactions: Vec<Transaction>,
}

/// Abbreviated view of the most recent transaction in a cycle
#[derive(Debug, Clone, Serialize)]
pub struct TransactionSummary {
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
}

/// Response for GET /stats
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub message: String,
    pub cycle: String,
    /// Cycle spend excluding Income/Transfer
    pub total: f64,
    /// Transaction count excluding Income/Transfer
    pub count: i64,
    pub categories: Vec<CategoryStats>,
    #[serde(rename = "lastTransaction", skip_serializing_if = "Option::is_none")]
    pub last_transaction: Option<TransactionSummary>,
    /// Flat date-descending list for the dashboard, including income
    #[serde(rename = "allTransactions", skip_serializing_if = "Vec::is_empty")]
    pub all_transactions: Vec<Transaction>,
}
