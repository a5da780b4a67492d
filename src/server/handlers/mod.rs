pub mod actions;
pub mod admin;
pub mod categories;
pub mod health;
pub mod journal;
pub mod projects;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::error::ServiceError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Service error carried to the HTTP layer. Every response gets a JSON
/// body with an error kind, a message and, for validation failures, the
/// offending field.
pub struct ApiError(ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, field, message) = match self.0 {
            ServiceError::Validation { field, message } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_failed",
                Some(field),
                message,
            ),
            ServiceError::Conflict(message) => (StatusCode::CONFLICT, "conflict", None, message),
            ServiceError::Protected(message) => (StatusCode::CONFLICT, "protected", None, message),
            err @ ServiceError::NotFound(_) => {
                (StatusCode::NOT_FOUND, "not_found", None, err.to_string())
            }
            err @ ServiceError::PermissionDenied { .. } => (
                StatusCode::FORBIDDEN,
                "permission_denied",
                None,
                err.to_string(),
            ),
            ServiceError::Database(err) => {
                error!("database error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    None,
                    "internal error".to_string(),
                )
            }
        };

        let body = json!({
            "error": kind,
            "message": message,
            "field": field,
        });

        (status, Json(body)).into_response()
    }
}
