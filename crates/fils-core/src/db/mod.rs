//! Database access layer with connection pooling and schema setup
//!
//! Transaction CRUD lives in the `transactions` submodule; this module
//! owns the pool and the schema.

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use tracing::info;

use crate::error::Result;

mod transactions;

pub use transactions::InsertOutcome;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Database wrapper with connection pooling
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    /// Path to the database file
    db_path: String,
}

impl Database {
    /// Create a new database connection pool and initialize the schema.
    ///
    /// The pool is sized to a single connection: SQLite allows one writer
    /// at a time and every mutation here must be serialized anyway.
    pub fn new(path: &str) -> Result<Self> {
        Self::from_manager(SqliteConnectionManager::file(path), path)
    }

    /// Get the path to the database file
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Create an in-memory database (for testing)
    ///
    /// Safe with the pool because it never holds more than one
    /// connection, so every checkout sees the same database. Nothing
    /// touches the filesystem.
    pub fn in_memory() -> Result<Self> {
        Self::from_manager(SqliteConnectionManager::memory(), ":memory:")
    }

    fn from_manager(manager: SqliteConnectionManager, path: &str) -> Result<Self> {
        let pool = Pool::builder().max_size(1).build(manager)?;

        let db = Self {
            pool,
            db_path: path.to_string(),
        };
        db.run_migrations()?;

        Ok(db)
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    /// Run database migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            -- WAL mode: better concurrency, readers don't block the writer
            -- Note: creates -wal and -shm sidecar files alongside the database
            PRAGMA journal_mode = WAL;

            -- Synchronous NORMAL: good balance of safety and performance
            PRAGMA synchronous = NORMAL;

            -- Transactions
            -- The (description, amount, transaction_date) constraint is the
            -- duplicate-detection key used by imports and extraction.
            CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                description TEXT NOT NULL,
                amount REAL NOT NULL,
                transaction_date TEXT NOT NULL,
                category TEXT NOT NULL,
                confidence INTEGER NOT NULL DEFAULT 0,
                billing_cycle TEXT NOT NULL,
                created_at TEXT NOT NULL,
                UNIQUE(description, amount, transaction_date)
            );

            -- Index for common queries
            CREATE INDEX IF NOT EXISTS idx_transactions_cycle ON transactions(billing_cycle);
            CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(transaction_date);
            CREATE INDEX IF NOT EXISTS idx_transactions_category ON transactions(category);
            "#,
        )?;

        info!("Database schema initialized");
        Ok(())
    }
}
