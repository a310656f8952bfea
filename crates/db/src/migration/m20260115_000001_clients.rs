//! Initial schema for the clients service.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(CLIENTS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS clients CASCADE;")
            .await?;
        Ok(())
    }
}

const CLIENTS_SQL: &str = r"
-- Clients table (person attributes flattened in)
CREATE TABLE clients (
    id BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    gender VARCHAR(16) NOT NULL,
    age BIGINT NOT NULL,
    national_id VARCHAR(64) NOT NULL,
    address VARCHAR(255) NOT NULL,
    phone VARCHAR(32),
    password_hash VARCHAR(255) NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT TRUE
);

-- Lookups by national id during registration checks
CREATE INDEX idx_clients_national_id ON clients(national_id);
";
