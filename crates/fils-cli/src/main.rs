//! Fils CLI - Personal expense tracker
//!
//! Usage:
//!   fils init                 Initialize database
//!   fils import --file CSV    Import transactions from CSV
//!   fils export               Export all transactions as CSV
//!   fils stats                Show current billing-cycle statistics
//!   fils serve --port 8080    Start web server

mod cli;
mod commands;


use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let db_path = resolve_db_path(&cli);

    match cli.command {
        Commands::Init => commands::cmd_init(&db_path),
        Commands::Import { file } => commands::cmd_import(&db_path, &file),
        Commands::Export { output } => commands::cmd_export(&db_path, output.as_deref()),
        Commands::Stats { json } => commands::cmd_stats(&db_path, json),
        Commands::Transactions { limit } => commands::cmd_transactions_list(&db_path, limit),
        Commands::Serve {
            port,
            host,
            static_dir,
        } => {
            let port = port
                .or_else(|| std::env::var("PORT").ok().and_then(|p| p.parse().ok()))
                .unwrap_or(8080);
            commands::cmd_serve(&db_path, &host, port, static_dir.as_deref()).await
        }
    }
}

/// Database path resolution: --db flag > DATABASE_PATH env > default
fn resolve_db_path(cli: &Cli) -> PathBuf {
    if let Some(path) = &cli.db {
        return path.clone();
    }
    match std::env::var("DATABASE_PATH") {
        Ok(p) if !p.is_empty() => PathBuf::from(p),
        _ => PathBuf::from("transactions.db"),
    }
}
