//! Transaction operations

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, OptionalExtension};

use super::Database;
use crate::error::{Error, Result};
use crate::models::{NewTransaction, Transaction, TransactionUpdate};

/// Result of inserting a transaction
#[derive(Debug, Clone)]
pub enum InsertOutcome {
    /// Transaction was inserted successfully, contains new transaction ID
    Inserted(i64),
    /// Transaction was a duplicate, contains existing transaction ID
    Duplicate(i64),
}

/// Parse a stored RFC 3339 timestamp, falling back to now for rows
/// written by hand or by older tooling
fn parse_created_at(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

impl Database {
    /// Insert a transaction, detecting duplicates on the
    /// (description, amount, date) key.
    pub fn insert_transaction(&self, tx: &NewTransaction) -> Result<InsertOutcome> {
        if let Some(existing_id) = self.find_duplicate(&tx.description, tx.amount, tx.date)? {
            return Ok(InsertOutcome::Duplicate(existing_id));
        }

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO transactions (description, amount, transaction_date, category, confidence, billing_cycle, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                tx.description,
                tx.amount,
                tx.date.to_string(),
                tx.category.as_str(),
                tx.confidence,
                tx.billing_cycle,
                tx.created_at.to_rfc3339(),
            ],
        )?;

        Ok(InsertOutcome::Inserted(conn.last_insert_rowid()))
    }

    /// Whether a transaction with this (description, amount, date) key exists
    pub fn transaction_exists(
        &self,
        description: &str,
        amount: f64,
        date: NaiveDate,
    ) -> Result<bool> {
        Ok(self.find_duplicate(description, amount, date)?.is_some())
    }

    fn find_duplicate(
        &self,
        description: &str,
        amount: f64,
        date: NaiveDate,
    ) -> Result<Option<i64>> {
        let conn = self.conn()?;
        let existing: Option<i64> = conn
            .query_row(
                "SELECT id FROM transactions
                 WHERE description = ? AND amount = ? AND transaction_date = ?",
                params![description, amount, date.to_string()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(existing)
    }

    /// Get a single transaction by ID
    pub fn get_transaction(&self, id: i64) -> Result<Option<Transaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, description, amount, transaction_date, category, confidence, billing_cycle, created_at
             FROM transactions WHERE id = ?",
        )?;

        let transaction = stmt
            .query_row(params![id], |row| Self::row_to_transaction(row))
            .optional()?;

        Ok(transaction)
    }

    /// Update the editable fields of a transaction.
    ///
    /// The billing cycle is recomputed from the new date by the caller
    /// and passed in, never taken from the client.
    pub fn update_transaction(
        &self,
        id: i64,
        update: &TransactionUpdate,
        billing_cycle: &str,
    ) -> Result<()> {
        let conn = self.conn()?;
        let changed = conn.execute(
            r#"
            UPDATE transactions
            SET description = ?, amount = ?, transaction_date = ?, category = ?, billing_cycle = ?
            WHERE id = ?
            "#,
            params![
                update.description,
                update.amount,
                update.date.to_string(),
                update.category.as_str(),
                billing_cycle,
                id,
            ],
        )?;

        if changed == 0 {
            return Err(Error::NotFound(id));
        }
        Ok(())
    }

    /// Delete a transaction by ID
    pub fn delete_transaction(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let changed = conn.execute("DELETE FROM transactions WHERE id = ?", params![id])?;

        if changed == 0 {
            return Err(Error::NotFound(id));
        }
        Ok(())
    }

    /// All transactions in a billing cycle, newest first.
    /// Ties on date break toward the most recently ingested row.
    pub fn transactions_for_cycle(&self, cycle: &str) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, description, amount, transaction_date, category, confidence, billing_cycle, created_at
            FROM transactions
            WHERE billing_cycle = ?
            ORDER BY transaction_date DESC, created_at DESC, id DESC
            "#,
        )?;

        let transactions = stmt
            .query_map(params![cycle], |row| Self::row_to_transaction(row))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// All transactions across every cycle, newest first
    pub fn all_transactions(&self) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, description, amount, transaction_date, category, confidence, billing_cycle, created_at
            FROM transactions
            ORDER BY transaction_date DESC, created_at DESC, id DESC
            "#,
        )?;

        let transactions = stmt
            .query_map([], |row| Self::row_to_transaction(row))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Count total transactions
    pub fn count_transactions(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Helper to convert a row to Transaction
    /// Column order: id, description, amount, transaction_date, category,
    ///               confidence, billing_cycle, created_at
    pub(crate) fn row_to_transaction(row: &rusqlite::Row) -> rusqlite::Result<Transaction> {
        let date_str: String = row.get(3)?;
        let category: String = row.get(4)?;
        let created_at_str: String = row.get(7)?;
        Ok(Transaction {
            id: row.get(0)?,
            description: row.get(1)?,
            amount: row.get(2)?,
            date: chrono::NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").unwrap_or_default(),
            category: category.into(),
            confidence: row.get(5)?,
            billing_cycle: row.get(6)?,
            created_at: parse_created_at(&created_at_str),
        })
    }
}
