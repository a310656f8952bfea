//! Movement routes for the ledger service.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::LedgerState;
use neobank_db::entities::movements;
use neobank_db::repositories::movement::{
    MovementRepository, SaveMovementInput, UpdateMovementInput,
};
use neobank_shared::AppError;

/// Creates the movement routes.
pub fn routes() -> Router<LedgerState> {
    Router::new()
        .route("/api/movimientos", get(list_movements))
        .route("/api/movimientos", post(save_movement))
        .route("/api/movimientos/registrar", post(register_movement))
        .route("/api/movimientos/{id}", get(get_movement))
        .route("/api/movimientos/{id}", put(update_movement))
        .route("/api/movimientos/{id}", delete(delete_movement))
}

/// Query parameters for the booking endpoint.
#[derive(Debug, Deserialize)]
pub struct RegisterMovementParams {
    /// Target account number.
    #[serde(rename = "numeroCuenta")]
    pub account_number: String,
    /// Historical label for the movement kind. Accepted for wire
    /// compatibility; the kind is derived from the sign of `valor`.
    #[serde(rename = "tipoMovimiento")]
    pub movement_type: Option<String>,
    /// Signed amount: positive deposits, negative withdraws.
    #[serde(rename = "valor")]
    pub amount: Decimal,
}

/// Request body for the generic save endpoint, all fields caller-supplied.
#[derive(Debug, Deserialize)]
pub struct SaveMovementRequest {
    /// When the movement occurred.
    #[serde(rename = "fecha")]
    pub occurred_at: DateTime<FixedOffset>,
    /// Description text.
    #[serde(rename = "tipoMovimiento")]
    pub description: String,
    /// Signed amount.
    #[serde(rename = "valor")]
    pub amount: Decimal,
    /// Balance snapshot after the movement.
    #[serde(rename = "saldo")]
    pub balance: Decimal,
    /// Owning account number.
    #[serde(rename = "numeroCuenta")]
    pub account_number: String,
}

/// Request body for overwriting a movement.
#[derive(Debug, Deserialize)]
pub struct UpdateMovementRequest {
    /// When the movement occurred.
    #[serde(rename = "fecha")]
    pub occurred_at: DateTime<FixedOffset>,
    /// Description text.
    #[serde(rename = "tipoMovimiento")]
    pub description: String,
    /// Signed amount.
    #[serde(rename = "valor")]
    pub amount: Decimal,
    /// Balance snapshot.
    #[serde(rename = "saldo")]
    pub balance: Decimal,
}

/// Response body for a movement.
#[derive(Debug, Serialize)]
pub struct MovementResponse {
    /// Movement identifier.
    pub id: i64,
    /// When the movement occurred.
    #[serde(rename = "fecha")]
    pub occurred_at: DateTime<FixedOffset>,
    /// Description text, e.g. `Deposit of 500`.
    #[serde(rename = "tipoMovimiento")]
    pub description: String,
    /// Signed amount.
    #[serde(rename = "valor")]
    pub amount: Decimal,
    /// Balance after the movement.
    #[serde(rename = "saldo")]
    pub balance: Decimal,
    /// Owning account number.
    #[serde(rename = "numeroCuenta")]
    pub account_number: String,
}

impl From<movements::Model> for MovementResponse {
    fn from(model: movements::Model) -> Self {
        Self {
            id: model.id,
            occurred_at: model.occurred_at,
            description: model.description,
            amount: model.amount,
            balance: model.balance,
            account_number: model.account_number,
        }
    }
}

/// GET `/api/movimientos` - List all movements.
async fn list_movements(State(state): State<LedgerState>) -> Result<Response, ApiError> {
    let repo = MovementRepository::new((*state.db).clone());
    let movements = repo.list().await?;
    let body: Vec<MovementResponse> = movements.into_iter().map(Into::into).collect();
    Ok((StatusCode::OK, Json(body)).into_response())
}

/// GET `/api/movimientos/{id}` - Get a movement by id.
async fn get_movement(
    State(state): State<LedgerState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let repo = MovementRepository::new((*state.db).clone());
    let movement = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("movement not found with id: {id}")))?;
    Ok((StatusCode::OK, Json(MovementResponse::from(movement))).into_response())
}

/// POST `/api/movimientos/registrar` - Book a movement against an account.
///
/// A positive `valor` deposits, a negative one withdraws, zero counts as a
/// deposit. The booking fails with 400 when the withdrawal would leave the
/// balance negative.
async fn register_movement(
    State(state): State<LedgerState>,
    Query(params): Query<RegisterMovementParams>,
) -> Result<Response, ApiError> {
    if let Some(label) = &params.movement_type {
        debug!(label = %label, "movement type label accepted, kind derives from the amount sign");
    }

    let repo = MovementRepository::new((*state.db).clone());
    let movement = repo.register(&params.account_number, params.amount).await?;

    Ok((StatusCode::OK, Json(MovementResponse::from(movement))).into_response())
}

/// POST `/api/movimientos` - Save a movement with caller-supplied fields.
///
/// Administrative variant: the row is stored as given and the account
/// balance is not touched.
async fn save_movement(
    State(state): State<LedgerState>,
    Json(payload): Json<SaveMovementRequest>,
) -> Result<Response, ApiError> {
    let repo = MovementRepository::new((*state.db).clone());
    let movement = repo
        .save(SaveMovementInput {
            occurred_at: payload.occurred_at,
            description: payload.description,
            amount: payload.amount,
            balance: payload.balance,
            account_number: payload.account_number,
        })
        .await?;

    info!(movement_id = movement.id, "movement saved");
    Ok((StatusCode::CREATED, Json(MovementResponse::from(movement))).into_response())
}

/// PUT `/api/movimientos/{id}` - Overwrite a movement.
async fn update_movement(
    State(state): State<LedgerState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateMovementRequest>,
) -> Result<Response, ApiError> {
    let repo = MovementRepository::new((*state.db).clone());
    let movement = repo
        .update(
            id,
            UpdateMovementInput {
                occurred_at: payload.occurred_at,
                description: payload.description,
                amount: payload.amount,
                balance: payload.balance,
            },
        )
        .await?;

    info!(movement_id = id, "movement updated");
    Ok((StatusCode::OK, Json(MovementResponse::from(movement))).into_response())
}

/// DELETE `/api/movimientos/{id}` - Delete a movement.
async fn delete_movement(
    State(state): State<LedgerState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let repo = MovementRepository::new((*state.db).clone());
    let movement = repo.delete(id).await?;

    info!(movement_id = id, "movement deleted");
    Ok((StatusCode::OK, Json(MovementResponse::from(movement))).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_register_params_parse_from_query_names() {
        let params: RegisterMovementParams = serde_urlencoded_from(
            "numeroCuenta=478758&tipoMovimiento=Retiro&valor=-575",
        );
        assert_eq!(params.account_number, "478758");
        assert_eq!(params.movement_type.as_deref(), Some("Retiro"));
        assert_eq!(params.amount, dec!(-575));
    }

    #[test]
    fn test_register_params_movement_type_is_optional() {
        let params: RegisterMovementParams =
            serde_urlencoded_from("numeroCuenta=225487&valor=600");
        assert!(params.movement_type.is_none());
        assert_eq!(params.amount, dec!(600));
    }

    #[test]
    fn test_response_uses_wire_names() {
        let model = movements::Model {
            id: 9,
            occurred_at: FixedOffset::east_opt(0)
                .unwrap()
                .with_ymd_and_hms(2024, 3, 10, 14, 0, 0)
                .unwrap(),
            description: "Withdrawal of 575".to_string(),
            amount: dec!(-575),
            balance: dec!(1425),
            account_number: "478758".to_string(),
        };
        let json = serde_json::to_value(MovementResponse::from(model)).unwrap();

        assert_eq!(json["tipoMovimiento"], "Withdrawal of 575");
        assert_eq!(json["valor"], "-575");
        assert_eq!(json["saldo"], "1425");
        assert_eq!(json["numeroCuenta"], "478758");
        assert!(json.get("fecha").is_some());
    }

    fn serde_urlencoded_from<T: serde::de::DeserializeOwned>(query: &str) -> T {
        serde_urlencoded::from_str(query).unwrap()
    }
}
