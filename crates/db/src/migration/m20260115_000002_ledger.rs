//! Initial schema for the ledger service.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(LEDGER_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "DROP TABLE IF EXISTS movements CASCADE; DROP TABLE IF EXISTS accounts CASCADE;",
        )
        .await?;
        Ok(())
    }
}

const LEDGER_SQL: &str = r"
-- Accounts table. client_id references the clients service and is not a
-- local foreign key.
CREATE TABLE accounts (
    account_number VARCHAR(32) PRIMARY KEY,
    account_type VARCHAR(16) NOT NULL,
    balance NUMERIC(19, 2) NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    client_id BIGINT NOT NULL
);

-- Bulk delete and report lookups by owning client
CREATE INDEX idx_accounts_client ON accounts(client_id);

-- Movements table. Deleting an account removes its ledger.
CREATE TABLE movements (
    id BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
    occurred_at TIMESTAMPTZ NOT NULL,
    description VARCHAR(255) NOT NULL,
    amount NUMERIC(19, 2) NOT NULL,
    balance NUMERIC(19, 2) NOT NULL,
    account_number VARCHAR(32) NOT NULL REFERENCES accounts(account_number) ON DELETE CASCADE
);

-- Report window scans per account
CREATE INDEX idx_movements_account_date ON movements(account_number, occurred_at);
";
