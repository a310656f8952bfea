//! Client registry routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use validator::Validate;

use crate::error::ApiError;
use crate::validation::{single_field_error, validate_gender, validation_error_response};
use crate::ClientsState;
use neobank_db::entities::clients;
use neobank_db::repositories::client::{ClientRepository, CreateClientInput, UpdateClientInput};
use neobank_shared::AppError;

/// Creates the client registry routes.
pub fn routes() -> Router<ClientsState> {
    Router::new()
        .route("/api/clientes", get(list_clients))
        .route("/api/clientes", post(create_client))
        .route("/api/clientes/{id}", get(get_client))
        .route("/api/clientes/{id}", put(update_client))
        .route("/api/clientes/{id}", delete(delete_client))
}

/// Request body for registering or overwriting a client.
#[derive(Debug, Deserialize, Validate)]
pub struct ClientRequest {
    /// Display name.
    #[serde(rename = "nombre")]
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    /// Gender label.
    #[serde(rename = "genero")]
    #[validate(custom(function = validate_gender))]
    pub gender: String,
    /// Age in years.
    #[serde(rename = "edad")]
    #[validate(range(min = 0, message = "age must not be negative"))]
    pub age: i64,
    /// National identification string.
    #[serde(rename = "identificacion")]
    #[validate(length(min = 1, message = "national id must not be empty"))]
    pub national_id: String,
    /// Postal address.
    #[serde(rename = "direccion")]
    #[validate(length(min = 1, message = "address must not be empty"))]
    pub address: String,
    /// Phone number.
    #[serde(rename = "telefono")]
    pub phone: Option<String>,
    /// Plaintext password. Required on create; optional on update, where an
    /// absent or empty value keeps the stored hash.
    #[serde(rename = "contrasenia")]
    pub password: Option<String>,
    /// Active flag, defaults to true.
    #[serde(rename = "estado", default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}

/// Response body for a client. The password hash is never serialized.
#[derive(Debug, Serialize)]
pub struct ClientResponse {
    /// Client identifier.
    pub id: i64,
    /// Display name.
    #[serde(rename = "nombre")]
    pub name: String,
    /// Gender label.
    #[serde(rename = "genero")]
    pub gender: String,
    /// Age in years.
    #[serde(rename = "edad")]
    pub age: i64,
    /// National identification string.
    #[serde(rename = "identificacion")]
    pub national_id: String,
    /// Postal address.
    #[serde(rename = "direccion")]
    pub address: String,
    /// Phone number.
    #[serde(rename = "telefono")]
    pub phone: Option<String>,
    /// Active flag.
    #[serde(rename = "estado")]
    pub active: bool,
}

impl From<clients::Model> for ClientResponse {
    fn from(model: clients::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            gender: model.gender,
            age: model.age,
            national_id: model.national_id,
            address: model.address,
            phone: model.phone,
            active: model.is_active,
        }
    }
}

/// GET `/api/clientes` - List all clients.
async fn list_clients(State(state): State<ClientsState>) -> Result<Response, ApiError> {
    let repo = ClientRepository::new((*state.db).clone());
    let clients = repo.list().await?;
    let body: Vec<ClientResponse> = clients.into_iter().map(Into::into).collect();
    Ok((StatusCode::OK, Json(body)).into_response())
}

/// GET `/api/clientes/{id}` - Get a client by id.
async fn get_client(
    State(state): State<ClientsState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let repo = ClientRepository::new((*state.db).clone());
    let client = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("client not found with id: {id}")))?;
    Ok((StatusCode::OK, Json(ClientResponse::from(client))).into_response())
}

/// POST `/api/clientes` - Register a client.
async fn create_client(
    State(state): State<ClientsState>,
    Json(payload): Json<ClientRequest>,
) -> Result<Response, ApiError> {
    if let Err(errors) = payload.validate() {
        return Ok(
            (StatusCode::BAD_REQUEST, Json(validation_error_response(&errors))).into_response(),
        );
    }
    let Some(password) = payload.password.clone().filter(|p| !p.is_empty()) else {
        let body = single_field_error("password", "", "password must not be empty");
        return Ok((StatusCode::BAD_REQUEST, Json(body)).into_response());
    };

    let repo = ClientRepository::new((*state.db).clone());
    let client = repo
        .create(CreateClientInput {
            name: payload.name,
            gender: payload.gender,
            age: payload.age,
            national_id: payload.national_id,
            address: payload.address,
            phone: payload.phone,
            password,
            active: payload.active,
        })
        .await?;

    info!(client_id = client.id, "client registered");
    Ok((StatusCode::CREATED, Json(ClientResponse::from(client))).into_response())
}

/// PUT `/api/clientes/{id}` - Overwrite a client.
async fn update_client(
    State(state): State<ClientsState>,
    Path(id): Path<i64>,
    Json(payload): Json<ClientRequest>,
) -> Result<Response, ApiError> {
    if let Err(errors) = payload.validate() {
        return Ok(
            (StatusCode::BAD_REQUEST, Json(validation_error_response(&errors))).into_response(),
        );
    }

    let repo = ClientRepository::new((*state.db).clone());
    let client = repo
        .update(
            id,
            UpdateClientInput {
                name: payload.name,
                gender: payload.gender,
                age: payload.age,
                national_id: payload.national_id,
                address: payload.address,
                phone: payload.phone,
                password: payload.password,
                active: payload.active,
            },
        )
        .await?;

    info!(client_id = id, "client updated");
    Ok((StatusCode::OK, Json(ClientResponse::from(client))).into_response())
}

/// DELETE `/api/clientes/{id}` - Delete a client and its remote accounts.
///
/// The ledger service is asked to drop the client's accounts first; if that
/// call does not report success the client record is left untouched. There
/// is no compensation should the local delete fail after the accounts are
/// already gone.
async fn delete_client(
    State(state): State<ClientsState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    state
        .ledger
        .delete_accounts_for_client(id)
        .await
        .inspect_err(|e| {
            error!(client_id = id, error = %e, "account cleanup failed, aborting client delete");
        })?;

    let repo = ClientRepository::new((*state.db).clone());
    let client = repo.delete(id).await?;

    info!(client_id = id, "client deleted");
    Ok((StatusCode::OK, Json(ClientResponse::from(client))).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> clients::Model {
        clients::Model {
            id: 4,
            name: "Marianela Montalvo".to_string(),
            gender: "Femenino".to_string(),
            age: 57,
            national_id: "097548965".to_string(),
            address: "Amazonas y NNUU".to_string(),
            phone: Some("097548965".to_string()),
            password_hash: "$argon2id$stub".to_string(),
            is_active: true,
        }
    }

    #[test]
    fn test_response_uses_wire_names_and_hides_hash() {
        let json = serde_json::to_value(ClientResponse::from(model())).unwrap();
        assert_eq!(json["nombre"], "Marianela Montalvo");
        assert_eq!(json["genero"], "Femenino");
        assert_eq!(json["edad"], 57);
        assert_eq!(json["identificacion"], "097548965");
        assert_eq!(json["direccion"], "Amazonas y NNUU");
        assert_eq!(json["estado"], true);
        assert!(json.get("contrasenia").is_none());
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn test_request_defaults_active_and_accepts_wire_names() {
        let parsed: ClientRequest = serde_json::from_str(
            r#"{
                "nombre": "Jose Lema",
                "genero": "Masculino",
                "edad": 30,
                "identificacion": "1710034065",
                "direccion": "Otavalo sn y principal",
                "telefono": "098254785",
                "contrasenia": "1234"
            }"#,
        )
        .unwrap();

        assert!(parsed.active);
        assert_eq!(parsed.password.as_deref(), Some("1234"));
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn test_invalid_gender_fails_validation() {
        let parsed: ClientRequest = serde_json::from_str(
            r#"{
                "nombre": "Jose Lema",
                "genero": "male",
                "edad": 30,
                "identificacion": "1710034065",
                "direccion": "Otavalo sn y principal",
                "contrasenia": "1234"
            }"#,
        )
        .unwrap();

        let errors = parsed.validate().unwrap_err();
        let body = validation_error_response(&errors);
        assert_eq!(body.field_errors.len(), 1);
        assert_eq!(body.field_errors[0].field, "gender");
    }
}
