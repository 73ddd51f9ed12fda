//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Fils - Track your AED spending by billing cycle
#[derive(Parser)]
#[command(name = "fils")]
#[command(about = "Personal expense tracker with billing-cycle budgets", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path (defaults to $DATABASE_PATH, then transactions.db)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Import transactions from a CSV file
    Import {
        /// CSV file to import
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Export all transactions as CSV, grouped by billing cycle
    Export {
        /// Output file (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show statistics for the current billing cycle
    Stats {
        /// Print the full statistics payload as JSON
        #[arg(long)]
        json: bool,
    },

    /// List recent transactions
    Transactions {
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Start the web server
    Serve {
        /// Port to listen on (defaults to $PORT, then 8080)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Directory containing the dashboard static files
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}
