//! Application configuration management.
//!
//! Both services share the same configuration shape: an HTTP listener, a
//! database, and exactly one peer service (the clients service for the
//! ledger, the ledger service for the clients registry).

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Sibling service configuration.
    pub peer: PeerConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

/// Sibling service configuration.
///
/// Cross-service calls block the request that issues them, so the timeout is
/// configurable rather than unbounded.
#[derive(Debug, Clone, Deserialize)]
pub struct PeerConfig {
    /// Base URL of the peer API, e.g. `http://localhost:8080/api`.
    pub base_url: String,
    /// Request timeout for peer calls, in seconds.
    #[serde(default = "default_peer_timeout")]
    pub timeout_secs: u64,
}

fn default_peer_timeout() -> u64 {
    5
}

impl AppConfig {
    /// Loads configuration for one service from config files and environment.
    ///
    /// Sources, later overriding earlier: `config/default.toml`,
    /// `config/{service}.toml`, then `NEOBANK__`-prefixed environment
    /// variables (e.g. `NEOBANK__SERVER__PORT`).
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or is incomplete.
    pub fn load(service: &str) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{service}")).required(false))
            .add_source(config::Environment::with_prefix("NEOBANK").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
