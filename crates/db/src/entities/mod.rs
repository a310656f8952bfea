//! `SeaORM` entity definitions.
//!
//! `clients` lives in the clients service database; `accounts` and
//! `movements` live in the ledger service database. Accounts reference
//! clients only by id across the service boundary, never by foreign key.

pub mod accounts;
pub mod clients;
pub mod movements;
