//! `SeaORM` Entity for the clients table.
//!
//! The original person/client split is flattened into one row; the shared
//! attributes are plain columns here.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A registered bank client.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "clients")]
pub struct Model {
    /// Surrogate identifier.
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Gender label (`Masculino`, `Femenino`, or `Otro`).
    pub gender: String,
    /// Age in years.
    pub age: i64,
    /// National identification string.
    pub national_id: String,
    /// Postal address.
    pub address: String,
    /// Phone number, if known.
    pub phone: Option<String>,
    /// Argon2id PHC hash of the client's password.
    pub password_hash: String,
    /// Whether the client is active.
    pub is_active: bool,
}

/// Clients have no local relations; accounts live in the sibling service.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
