//! `SeaORM` Entity for the movements table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A single signed balance change applied to an account.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "movements")]
pub struct Model {
    /// Surrogate identifier.
    #[sea_orm(primary_key)]
    pub id: i64,
    /// When the movement was registered.
    pub occurred_at: DateTimeWithTimeZone,
    /// Free-text description embedding the unsigned magnitude.
    pub description: String,
    /// Signed amount. Positive for deposits, negative for withdrawals.
    pub amount: Decimal,
    /// Account balance immediately after this movement.
    pub balance: Decimal,
    /// Owning account.
    pub account_number: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::AccountNumber",
        to = "super::accounts::Column::AccountNumber"
    )]
    Accounts,
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
