//! HTTP API layer with Axum routes for both Neobank services.
//!
//! This crate provides:
//! - REST API routes for the clients service and the ledger service
//! - Request/response DTOs with the historical wire field names
//! - HTTP clients for the cross-service calls

pub mod error;
pub mod remote;
pub mod routes;
pub mod validation;

use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::remote::{ClientDirectory, LedgerServiceClient};

pub use error::ApiError;

/// State shared across clients-service handlers.
#[derive(Clone)]
pub struct ClientsState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Client for the ledger service (account cleanup on delete).
    pub ledger: Arc<LedgerServiceClient>,
}

/// State shared across ledger-service handlers.
#[derive(Clone)]
pub struct LedgerState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Client for the clients service (existence checks, reports).
    pub clients: Arc<ClientDirectory>,
}

/// Creates the clients-service router.
pub fn create_clients_router(state: ClientsState) -> Router {
    Router::new()
        .merge(routes::health::routes())
        .merge(routes::clients::routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Creates the ledger-service router.
pub fn create_ledger_router(state: LedgerState) -> Router {
    Router::new()
        .merge(routes::health::routes())
        .merge(routes::accounts::routes())
        .merge(routes::movements::routes())
        .merge(routes::reports::routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
