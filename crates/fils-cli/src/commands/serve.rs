//! Server command implementation

use std::path::Path;

use anyhow::Result;
use fils_core::ExtractorClient;
use tracing::info;

use super::open_db;

pub async fn cmd_serve(
    db_path: &Path,
    host: &str,
    port: u16,
    static_dir: Option<&Path>,
) -> Result<()> {
    println!("🚀 Starting Fils expense tracker...");
    println!("   Database: {}", db_path.display());
    println!("   Listening: http://{}:{}", host, port);
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }

    let extractor = ExtractorClient::from_env();
    if extractor.is_none() {
        println!();
        println!("   ⚠️  OPENAI_API_KEY not set - SMS extraction disabled");
        println!("      POST /transaction will return an error until it is configured");
    }

    println!();
    println!("   Endpoints:");
    println!("     GET    /                - Dashboard UI");
    println!("     POST   /transaction     - Log new transactions");
    println!("     PUT    /transaction/:id - Update a transaction");
    println!("     DELETE /transaction/:id - Delete a transaction");
    println!("     GET    /stats           - Current cycle statistics");
    println!("     GET    /export          - Download CSV");
    println!("     POST   /import          - Upload CSV");
    println!("     GET    /health          - Health check");

    let db = open_db(db_path)?;
    let static_dir = static_dir.map(|p| p.to_path_buf());

    info!(%host, port, "starting HTTP server");

    fils_server::serve(db, host, port, static_dir, extractor).await
}
