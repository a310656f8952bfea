//! HTTP clients for the sibling service.
//!
//! Cross-service effects are separate transactions stitched together by a
//! blocking call; the only protection offered here is a configurable request
//! timeout. "The peer says the entity does not exist" and "the peer could
//! not be reached or misbehaved" are distinct error kinds so callers can map
//! them to 404 and 500 respectively.

use std::time::Duration;

use serde::Deserialize;
use tracing::info;

use neobank_shared::{AppError, PeerConfig};

/// Errors from cross-service calls.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// The peer answered 404 for the requested client.
    #[error("client not found with id: {0}")]
    ClientNotFound(i64),

    /// Transport failure or a non-success answer from the peer.
    #[error("peer service call failed: {0}")]
    Unavailable(String),

    /// The HTTP client could not be constructed from configuration.
    #[error("invalid peer configuration: {0}")]
    Config(String),
}

impl From<RemoteError> for AppError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::ClientNotFound(_) => Self::NotFound(err.to_string()),
            RemoteError::Unavailable(_) | RemoteError::Config(_) => {
                Self::ExternalService(err.to_string())
            }
        }
    }
}

/// A client record as served by the clients service.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteClient {
    /// Client identifier.
    pub id: i64,
    /// Display name.
    #[serde(rename = "nombre")]
    pub name: String,
    /// Active flag.
    #[serde(rename = "estado", default)]
    pub active: bool,
}

fn build_http(config: &PeerConfig) -> Result<reqwest::Client, RemoteError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(|e| RemoteError::Config(e.to_string()))
}

/// Lookup client for the clients service, used by the ledger side.
#[derive(Debug, Clone)]
pub struct ClientDirectory {
    http: reqwest::Client,
    base_url: String,
}

impl ClientDirectory {
    /// Creates a directory client from peer configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Config`] if the HTTP client cannot be built.
    pub fn new(config: &PeerConfig) -> Result<Self, RemoteError> {
        Ok(Self {
            http: build_http(config)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetches a client by id from the clients service.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::ClientNotFound`] on a peer 404 and
    /// [`RemoteError::Unavailable`] on transport failures or any other
    /// non-success answer.
    pub async fn fetch_client(&self, client_id: i64) -> Result<RemoteClient, RemoteError> {
        let url = format!("{}/clientes/{client_id}", self.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| RemoteError::Unavailable(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(RemoteError::ClientNotFound(client_id));
        }
        if !response.status().is_success() {
            return Err(RemoteError::Unavailable(format!(
                "clients service answered {}",
                response.status()
            )));
        }

        response
            .json::<RemoteClient>()
            .await
            .map_err(|e| RemoteError::Unavailable(e.to_string()))
    }
}

/// Client for the ledger service, used by the clients side for the
/// delete choreography.
#[derive(Debug, Clone)]
pub struct LedgerServiceClient {
    http: reqwest::Client,
    base_url: String,
}

impl LedgerServiceClient {
    /// Creates a ledger-service client from peer configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Config`] if the HTTP client cannot be built.
    pub fn new(config: &PeerConfig) -> Result<Self, RemoteError> {
        Ok(Self {
            http: build_http(config)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Deletes every account owned by a client on the ledger side.
    ///
    /// Success of this call is the precondition for deleting the client
    /// record; there is no compensation if the caller fails afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Unavailable`] on transport failures or any
    /// non-success answer.
    pub async fn delete_accounts_for_client(&self, client_id: i64) -> Result<(), RemoteError> {
        let url = format!("{}/cuentas/cliente/{client_id}", self.base_url);
        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(|e| RemoteError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(RemoteError::Unavailable(format!(
                "ledger service answered {}",
                response.status()
            )));
        }

        info!(client_id, "peer accounts deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peer(base_url: &str) -> PeerConfig {
        PeerConfig {
            base_url: base_url.to_string(),
            timeout_secs: 1,
        }
    }

    #[test]
    fn test_trailing_slash_is_normalized() {
        let directory = ClientDirectory::new(&peer("http://localhost:8080/api/")).unwrap();
        assert_eq!(directory.base_url, "http://localhost:8080/api");

        let ledger = LedgerServiceClient::new(&peer("http://localhost:8081/api")).unwrap();
        assert_eq!(ledger.base_url, "http://localhost:8081/api");
    }

    #[test]
    fn test_remote_client_deserializes_wire_names() {
        let parsed: RemoteClient = serde_json::from_str(
            r#"{"id": 4, "nombre": "Marianela Montalvo", "estado": true, "genero": "Femenino"}"#,
        )
        .unwrap();
        assert_eq!(parsed.id, 4);
        assert_eq!(parsed.name, "Marianela Montalvo");
        assert!(parsed.active);
    }

    #[test]
    fn test_error_mapping_separates_not_found_from_unavailable() {
        let not_found: AppError = RemoteError::ClientNotFound(7).into();
        assert_eq!(not_found.status_code(), 404);

        let unavailable: AppError = RemoteError::Unavailable("timeout".into()).into();
        assert_eq!(unavailable.status_code(), 500);
    }
}
