//! Shared types, errors, and configuration for Neobank.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error taxonomy
//! - Configuration management
//! - Wire-level types shared between the two services

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, DatabaseConfig, PeerConfig, ServerConfig};
pub use error::{AppError, AppResult};
pub use types::AccountType;
