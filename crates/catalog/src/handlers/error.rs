use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use catalog_core::cache::{cache_error_to_status_code, CacheError};
use catalog_core::catalog::ValidationError;
use catalog_core::storage::{repository_error_to_status_code, RepositoryError};

use crate::service::ServiceError;

/// Handler error that renders as `{"message": ...}` with a status derived from
/// the typed error inside.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    fn status_and_message(&self) -> (StatusCode, String) {
        if let Some(err) = self.0.downcast_ref::<ValidationError>() {
            return (StatusCode::BAD_REQUEST, err.to_string());
        }

        let code = if let Some(err) = self.0.downcast_ref::<ServiceError>() {
            err.status_code()
        } else if let Some(err) = self.0.downcast_ref::<RepositoryError>() {
            repository_error_to_status_code(err)
        } else if let Some(err) = self.0.downcast_ref::<CacheError>() {
            cache_error_to_status_code(err)
        } else {
            500
        };

        let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let message = if status.is_client_error() {
            // Client errors carry the root cause, e.g. "Product not found: 7".
            self.0.root_cause().to_string()
        } else {
            self.0.to_string()
        };

        (status, message)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_client_error() {
            tracing::warn!(status = %status, message = %message, "API error");
        }
        message_response(status, message)
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// Builds a `{"message": ...}` response.
pub fn message_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "message": message.into() }))).into_response()
}
