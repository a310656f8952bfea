//! Error-to-response translation.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use neobank_shared::AppError;

/// Wrapper that lets handlers bubble any layer error with `?`.
///
/// Everything serializes as `{ error: CODE, message }` with the status from
/// the [`AppError`] taxonomy, except insufficient funds, which is a
/// plain-text 400 body.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl<E> From<E> for ApiError
where
    E: Into<AppError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(error = %self.0, code = self.0.error_code(), "request failed");
        }

        if let AppError::InsufficientFunds(message) = self.0 {
            return (status, message).into_response();
        }

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": self.0.to_string(),
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let response = ApiError(AppError::NotFound("client 9 not found".into())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_insufficient_funds_is_plain_text_400() {
        let response =
            ApiError(AppError::InsufficientFunds("insufficient balance".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("text/plain"));
    }

    #[test]
    fn test_remote_failure_maps_to_500() {
        let response =
            ApiError(AppError::ExternalService("peer unreachable".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
