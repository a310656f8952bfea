//! Database migration runner.
//!
//! Each service owns its own database, so the schema to migrate is chosen
//! with `NEOBANK_SCHEMA` (`clients` or `ledger`) and the target database
//! with `DATABASE_URL`.
//!
//! Usage:
//!   NEOBANK_SCHEMA=clients migrator up      - Run all pending migrations
//!   NEOBANK_SCHEMA=clients migrator down    - Rollback last migration
//!   NEOBANK_SCHEMA=ledger  migrator status  - Show migration status
//!   NEOBANK_SCHEMA=ledger  migrator fresh   - Drop all tables and re-run

use sea_orm_migration::prelude::*;

use neobank_db::migration::{ClientsMigrator, LedgerMigrator};

#[tokio::main]
async fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let schema = std::env::var("NEOBANK_SCHEMA").unwrap_or_else(|_| "clients".to_string());

    // The migrator CLI sets up its own tracing
    match schema.as_str() {
        "clients" => cli::run_cli(ClientsMigrator).await,
        "ledger" => cli::run_cli(LedgerMigrator).await,
        other => {
            eprintln!("unknown NEOBANK_SCHEMA '{other}', expected 'clients' or 'ledger'");
            std::process::exit(1);
        }
    }
}
