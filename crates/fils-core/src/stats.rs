//! Per-cycle statistics aggregation
//!
//! Spend totals and counts exclude Income/Transfer so that a salary
//! deposit does not inflate the cycle. The category breakdown still
//! carries every group, income included, for the dashboard.

use chrono::NaiveDate;

use crate::models::{CategoryStats, StatsResponse, Transaction, TransactionSummary};

fn pluralize(count: i64) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Aggregate a billing cycle's transactions into a stats response.
///
/// `transactions` must already be ordered newest first (date, then
/// ingestion time); group and flat listings preserve that order.
/// `today` drives the "today" label on the last-transaction line.
pub fn compute_stats(
    cycle: &str,
    transactions: &[Transaction],
    today: NaiveDate,
) -> StatsResponse {
    let total: f64 = transactions
        .iter()
        .filter(|t| !t.category.is_income())
        .map(|t| t.amount)
        .sum();
    let count = transactions
        .iter()
        .filter(|t| !t.category.is_income())
        .count() as i64;

    // A cycle holding only income reads as empty
    if count == 0 {
        return StatsResponse {
            success: true,
            message: format!(
                "📊 Billing Cycle: {}\n\nNo transactions found for this cycle yet.\n\nStart logging your expenses!",
                cycle
            ),
            cycle: cycle.to_string(),
            total: 0.0,
            count: 0,
            categories: Vec::new(),
            last_transaction: None,
            all_transactions: Vec::new(),
        };
    }

    // Group by category, preserving the newest-first order within groups
    let mut categories: Vec<CategoryStats> = Vec::new();
    for tx in transactions {
        match categories.iter_mut().find(|c| c.category == tx.category) {
            Some(group) => {
                group.total += tx.amount;
                group.count += 1;
                group.transactions.push(tx.clone());
            }
            None => categories.push(CategoryStats {
                category: tx.category,
                emoji: tx.category.emoji().to_string(),
                total: tx.amount,
                count: 1,
                transactions: vec![tx.clone()],
            }),
        }
    }
    categories.sort_by(|a, b| b.total.total_cmp(&a.total));

    let last_transaction = transactions.first().map(|tx| TransactionSummary {
        description: tx.description.clone(),
        amount: tx.amount,
        date: tx.date,
    });

    let mut message = format!("📊 Billing Cycle: {} (23rd - 22nd)\n", cycle);
    message += "━━━━━━━━━━━━━━━\n";
    message += &format!("💰 Total Spent: {:.2} AED\n\n", total);
    message += "By Category:\n";
    for cat in &categories {
        message += &format!(
            "{} {}: {:.2} AED ({} transaction{})\n",
            cat.emoji,
            cat.category,
            cat.total,
            cat.count,
            pluralize(cat.count)
        );
    }
    if let Some(last) = &last_transaction {
        let date_str = if last.date == today {
            "today".to_string()
        } else {
            last.date.format("%b %-d").to_string()
        };
        message += "\n━━━━━━━━━━━━━━━\n";
        message += "🕐 Last transaction:\n";
        message += &format!("   {} - {:.2} AED ({})", last.description, last.amount, date_str);
    }

    StatsResponse {
        success: true,
        message,
        cycle: cycle.to_string(),
        total,
        count,
        categories,
        last_transaction,
        all_transactions: transactions.to_vec(),
    }
}
