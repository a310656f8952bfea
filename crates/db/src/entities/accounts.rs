//! `SeaORM` Entity for the accounts table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A bank account owned by a remote client.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    /// Account number, caller-supplied or generated.
    #[sea_orm(primary_key, auto_increment = false)]
    pub account_number: String,
    /// Account type label (`Ahorro` / `Corriente`).
    pub account_type: String,
    /// Current balance. Overwritten in place on every movement.
    pub balance: Decimal,
    /// Whether the account is active.
    pub is_active: bool,
    /// Owning client id in the clients service. Not a local foreign key.
    pub client_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Movements booked against this account.
    #[sea_orm(has_many = "super::movements::Entity")]
    Movements,
}

impl Related<super::movements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Movements.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
