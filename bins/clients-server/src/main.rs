//! Neobank clients service.
//!
//! Hosts the client registry API and calls the ledger service to clean up
//! accounts when a client is deleted.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use neobank_api::remote::LedgerServiceClient;
use neobank_api::{ClientsState, create_clients_router};
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

    let config = AppConfig::load("clients").context("failed to load configuration")?;

    let db = connect(&config.database).await?;
    info!("Connected to database");

    let ledger = LedgerServiceClient::new(&config.peer)
        .context("failed to build ledger service client")?;
    info!(base_url = %config.peer.base_url, "Ledger service client configured");

    let state = ClientsState {
        db: Arc::new(db),
        ledger: Arc::new(ledger),
    };

    let app = create_clients_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Clients service listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
