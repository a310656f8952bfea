//! Account routes for the ledger service.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::error::ApiError;
use crate::validation::{ErrorResponse, single_field_error};
use crate::LedgerState;
use neobank_db::entities::accounts;
use neobank_db::repositories::account::{
    AccountRepository, OpenAccountInput, SaveAccountInput, UpdateAccountInput,
};
use neobank_shared::{AccountType, AppError};

/// Creates the account routes.
pub fn routes() -> Router<LedgerState> {
    Router::new()
        .route("/api/cuentas", get(list_accounts))
        .route("/api/cuentas", post(save_account))
        .route("/api/cuentas/crear", post(open_account))
        .route("/api/cuentas/{numeroCuenta}", get(get_account))
        .route("/api/cuentas/{numeroCuenta}", put(update_account))
        .route("/api/cuentas/{numeroCuenta}", delete(delete_account))
        .route("/api/cuentas/cliente/{clienteId}", delete(delete_client_accounts))
}

/// Request body for the structured account-opening endpoint.
#[derive(Debug, Deserialize)]
pub struct OpenAccountRequest {
    /// Owning client id, validated against the clients service.
    #[serde(rename = "clienteId")]
    pub client_id: i64,
    /// Account type label, `Ahorro` or `Corriente`.
    #[serde(rename = "tipoCuenta")]
    pub account_type: String,
    /// Opening balance.
    #[serde(rename = "saldoInicial", default)]
    pub initial_balance: Decimal,
    /// Optional caller-supplied account number; absent or empty means
    /// generate one.
    #[serde(rename = "numeroCuenta")]
    pub account_number: Option<String>,
}

/// Request body for the generic save endpoint, all fields caller-supplied.
#[derive(Debug, Deserialize)]
pub struct SaveAccountRequest {
    /// Account number.
    #[serde(rename = "numeroCuenta")]
    pub account_number: String,
    /// Account type label.
    #[serde(rename = "tipoCuenta")]
    pub account_type: String,
    /// Balance.
    #[serde(rename = "saldoInicial")]
    pub balance: Decimal,
    /// Active flag, defaults to true.
    #[serde(rename = "estado", default = "default_active")]
    pub active: bool,
    /// Owning client id.
    #[serde(rename = "clienteId")]
    pub client_id: i64,
}

/// Request body for overwriting an account.
#[derive(Debug, Deserialize)]
pub struct UpdateAccountRequest {
    /// Account type label.
    #[serde(rename = "tipoCuenta")]
    pub account_type: String,
    /// Balance.
    #[serde(rename = "saldoInicial")]
    pub balance: Decimal,
    /// Active flag.
    #[serde(rename = "estado")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}

/// Response body for an account.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    /// Account number.
    #[serde(rename = "numeroCuenta")]
    pub account_number: String,
    /// Account type label.
    #[serde(rename = "tipoCuenta")]
    pub account_type: String,
    /// Balance.
    #[serde(rename = "saldoInicial")]
    pub balance: Decimal,
    /// Active flag.
    #[serde(rename = "estado")]
    pub active: bool,
    /// Owning client id.
    #[serde(rename = "clienteId")]
    pub client_id: i64,
}

impl From<accounts::Model> for AccountResponse {
    fn from(model: accounts::Model) -> Self {
        Self {
            account_number: model.account_number,
            account_type: model.account_type,
            balance: model.balance,
            active: model.is_active,
            client_id: model.client_id,
        }
    }
}

fn parse_account_type(label: &str) -> Result<AccountType, ErrorResponse> {
    AccountType::parse(label).ok_or_else(|| {
        single_field_error(
            "account_type",
            label,
            "account type must be Ahorro or Corriente",
        )
    })
}

/// GET `/api/cuentas` - List all accounts.
async fn list_accounts(State(state): State<LedgerState>) -> Result<Response, ApiError> {
    let repo = AccountRepository::new((*state.db).clone());
    let accounts = repo.list().await?;
    let body: Vec<AccountResponse> = accounts.into_iter().map(Into::into).collect();
    Ok((StatusCode::OK, Json(body)).into_response())
}

/// GET `/api/cuentas/{numeroCuenta}` - Get an account by number.
async fn get_account(
    State(state): State<LedgerState>,
    Path(account_number): Path<String>,
) -> Result<Response, ApiError> {
    let repo = AccountRepository::new((*state.db).clone());
    let account = repo.find_by_number(&account_number).await?.ok_or_else(|| {
        AppError::NotFound(format!("account not found with number: {account_number}"))
    })?;
    Ok((StatusCode::OK, Json(AccountResponse::from(account))).into_response())
}

/// POST `/api/cuentas/crear` - Open an account for an existing client.
///
/// The owning client is resolved through the clients service before any row
/// is written, so an account can never be opened for an unknown client.
async fn open_account(
    State(state): State<LedgerState>,
    Json(payload): Json<OpenAccountRequest>,
) -> Result<Response, ApiError> {
    if payload.initial_balance < Decimal::ZERO {
        let body = single_field_error(
            "initial_balance",
            &payload.initial_balance.to_string(),
            "initial balance must not be negative",
        );
        return Ok((StatusCode::BAD_REQUEST, Json(body)).into_response());
    }
    let account_type = match parse_account_type(&payload.account_type) {
        Ok(kind) => kind,
        Err(body) => return Ok((StatusCode::BAD_REQUEST, Json(body)).into_response()),
    };

    let client = state.clients.fetch_client(payload.client_id).await?;

    let repo = AccountRepository::new((*state.db).clone());
    let account = repo
        .open(OpenAccountInput {
            client_id: client.id,
            account_type,
            initial_balance: payload.initial_balance,
            account_number: payload.account_number,
        })
        .await?;

    info!(
        account_number = %account.account_number,
        client_id = client.id,
        "account opened"
    );
    Ok((StatusCode::CREATED, Json(AccountResponse::from(account))).into_response())
}

/// POST `/api/cuentas` - Save an account with caller-supplied fields.
///
/// Administrative variant of account creation; the client id is stored as
/// given without consulting the clients service.
async fn save_account(
    State(state): State<LedgerState>,
    Json(payload): Json<SaveAccountRequest>,
) -> Result<Response, ApiError> {
    let account_type = match parse_account_type(&payload.account_type) {
        Ok(kind) => kind,
        Err(body) => return Ok((StatusCode::BAD_REQUEST, Json(body)).into_response()),
    };

    let repo = AccountRepository::new((*state.db).clone());
    let account = repo
        .save(SaveAccountInput {
            account_number: payload.account_number,
            account_type,
            balance: payload.balance,
            active: payload.active,
            client_id: payload.client_id,
        })
        .await?;

    info!(account_number = %account.account_number, "account saved");
    Ok((StatusCode::CREATED, Json(AccountResponse::from(account))).into_response())
}

/// PUT `/api/cuentas/{numeroCuenta}` - Overwrite an account.
async fn update_account(
    State(state): State<LedgerState>,
    Path(account_number): Path<String>,
    Json(payload): Json<UpdateAccountRequest>,
) -> Result<Response, ApiError> {
    let account_type = match parse_account_type(&payload.account_type) {
        Ok(kind) => kind,
        Err(body) => return Ok((StatusCode::BAD_REQUEST, Json(body)).into_response()),
    };

    let repo = AccountRepository::new((*state.db).clone());
    let account = repo
        .update(
            &account_number,
            UpdateAccountInput {
                account_type,
                balance: payload.balance,
                active: payload.active,
            },
        )
        .await?;

    info!(account_number = %account_number, "account updated");
    Ok((StatusCode::OK, Json(AccountResponse::from(account))).into_response())
}

/// DELETE `/api/cuentas/{numeroCuenta}` - Delete an account.
///
/// Movements under the account go with it via the foreign-key cascade.
async fn delete_account(
    State(state): State<LedgerState>,
    Path(account_number): Path<String>,
) -> Result<Response, ApiError> {
    let repo = AccountRepository::new((*state.db).clone());
    let account = repo.delete(&account_number).await?;

    info!(account_number = %account_number, "account deleted");
    Ok((StatusCode::OK, Json(AccountResponse::from(account))).into_response())
}

/// DELETE `/api/cuentas/cliente/{clienteId}` - Delete every account owned by
/// a client. Called by the clients service during client deletion; succeeds
/// with a zero count when the client has no accounts.
async fn delete_client_accounts(
    State(state): State<LedgerState>,
    Path(client_id): Path<i64>,
) -> Result<Response, ApiError> {
    let repo = AccountRepository::new((*state.db).clone());
    let deleted = repo.delete_by_client(client_id).await?;

    info!(client_id, deleted, "client accounts deleted");
    Ok((
        StatusCode::OK,
        Json(json!({ "clienteId": client_id, "cuentasEliminadas": deleted })),
    )
    .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_open_request_accepts_wire_names() {
        let parsed: OpenAccountRequest = serde_json::from_str(
            r#"{"clienteId": 1, "tipoCuenta": "Ahorro", "saldoInicial": "2000"}"#,
        )
        .unwrap();

        assert_eq!(parsed.client_id, 1);
        assert_eq!(parsed.account_type, "Ahorro");
        assert_eq!(parsed.initial_balance, dec!(2000));
        assert!(parsed.account_number.is_none());
    }

    #[test]
    fn test_open_request_defaults_balance_to_zero() {
        let parsed: OpenAccountRequest =
            serde_json::from_str(r#"{"clienteId": 7, "tipoCuenta": "Corriente"}"#).unwrap();
        assert_eq!(parsed.initial_balance, Decimal::ZERO);
    }

    #[test]
    fn test_response_uses_wire_names() {
        let model = accounts::Model {
            account_number: "478758".to_string(),
            account_type: "Ahorro".to_string(),
            balance: dec!(2000),
            is_active: true,
            client_id: 1,
        };
        let json = serde_json::to_value(AccountResponse::from(model)).unwrap();

        assert_eq!(json["numeroCuenta"], "478758");
        assert_eq!(json["tipoCuenta"], "Ahorro");
        assert_eq!(json["saldoInicial"], "2000");
        assert_eq!(json["estado"], true);
        assert_eq!(json["clienteId"], 1);
    }

    #[test]
    fn test_unknown_account_type_is_rejected() {
        assert!(parse_account_type("Plazo").is_err());
        assert!(parse_account_type("Ahorro").is_ok());
    }
}
