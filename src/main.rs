//! Calorie Tracker
//!
//! An MCP server for free-text meal logging and calorie estimation.

use std::path::PathBuf;
use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use calorie_tracker::build_info;
use calorie_tracker::db;
use calorie_tracker::estimator::{CalorieTables, Estimator};
use calorie_tracker::mcp::CalorieService;

/// Get the database path from environment or use default
fn get_database_path() -> PathBuf {
    std::env::var("CALORIE_TRACKER_DATABASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let mut path = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                .unwrap_or_else(|| PathBuf::from("."));

            // Go up from target/release or target/debug to project root
            if path.ends_with("release") || path.ends_with("debug") {
                if let Some(parent) = path.parent() {
                    if let Some(grandparent) = parent.parent() {
                        path = grandparent.to_path_buf();
                    }
                }
            }

            path.push("data");
            path.push("calorie_tracker.db");
            path
        })
}

/// Load the calorie tables, from a file if configured
fn load_calorie_tables() -> Result<CalorieTables, Box<dyn std::error::Error>> {
    match std::env::var("CALORIE_TRACKER_DATA_PATH") {
        Ok(path) => {
            eprintln!("Calorie data: {}", path);
            Ok(CalorieTables::load(&path)?)
        }
        Err(_) => {
            eprintln!("Calorie data: built-in");
            Ok(CalorieTables::builtin()?)
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("calorie_tracker=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    // Print startup banner to stderr
    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    // Tables are validated here; the estimator assumes well-formed data
    let tables = load_calorie_tables()?;
    tracing::info!(
        "Loaded {} foods and {} portion sizes",
        tables.foods().len(),
        tables.portions().len()
    );
    let estimator = Estimator::new(tables);

    // Get database path
    let db_path = get_database_path();
    eprintln!("Database path: {}", db_path.display());

    // Ensure data directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Initialize database
    eprintln!("Initializing database...");
    let database = db::Database::new(&db_path)?;

    // Run migrations
    database.with_conn(|conn| {
        db::migrations::run_migrations(conn)?;
        let version = db::migrations::get_schema_version(conn)?;
        eprintln!("Database schema version: {}", version);
        Ok(())
    })?;

    // Create the calorie tracker service
    let service = CalorieService::new(db_path, database, estimator);

    // Create stdio transport
    let transport = (stdin(), stdout());

    // Start the MCP server
    let server = service.serve(transport).await?;

    // Wait for the server to complete
    server.waiting().await?;

    Ok(())
}
