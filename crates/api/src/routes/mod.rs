//! API route definitions.
//!
//! `clients` belongs to the clients service; `accounts`, `movements`, and
//! `reports` belong to the ledger service. `health` is mounted on both.

pub mod accounts;
pub mod clients;
pub mod health;
pub mod movements;
pub mod reports;
