//! Database migrations.
//!
//! Migrations are managed using sea-orm-migration. The two services own
//! separate databases, so each gets its own migrator.

pub use sea_orm_migration::prelude::*;

mod m20260115_000001_clients;
mod m20260115_000002_ledger;

/// Migrator for the clients service database.
pub struct ClientsMigrator;

#[async_trait::async_trait]
impl MigratorTrait for ClientsMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20260115_000001_clients::Migration)]
    }
}

/// Migrator for the ledger service database.
pub struct LedgerMigrator;

#[async_trait::async_trait]
impl MigratorTrait for LedgerMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20260115_000002_ledger::Migration)]
    }
}
