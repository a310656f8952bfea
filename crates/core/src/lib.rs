//! Core business logic for Neobank.
//!
//! Pure domain logic with no web or database dependencies:
//! - Movement planning (balance arithmetic and the non-negative rule)
//! - Account number generation
//! - Account statement assembly
//! - Password hashing for client records

pub mod account;
pub mod auth;
pub mod ledger;
pub mod report;
