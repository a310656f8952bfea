//! Neobank ledger service.
//!
//! Hosts the account, movement, and report APIs. Client existence is
//! resolved against the clients service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use neobank_api::remote::ClientDirectory;
use neobank_api::{LedgerState, create_ledger_router};
use neobank_db::connect;
use neobank_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "neobank=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load("ledger").context("failed to load configuration")?;

    let db = connect(&config.database).await?;
    info!("Connected to database");

    let clients = ClientDirectory::new(&config.peer)
        .context("failed to build clients service client")?;
    info!(base_url = %config.peer.base_url, "Clients service client configured");

    let state = LedgerState {
        db: Arc::new(db),
        clients: Arc::new(clients),
    };

    let app = create_ledger_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Ledger service listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
