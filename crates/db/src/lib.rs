//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions for both service schemas
//! - Repository abstractions for data access
//! - Database migrations (one set per service)

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{AccountRepository, ClientRepository, MovementRepository};

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

use neobank_shared::DatabaseConfig;

/// Establishes a connection pool to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options.max_connections(config.max_connections);
    Database::connect(options).await
}
