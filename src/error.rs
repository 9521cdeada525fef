//! Domain error types for the field service server.
//!
//! Uses thiserror for ergonomic error handling with automatic Display implementations.

use actix_web::{HttpResponse, ResponseError};
use std::collections::BTreeMap;
use std::fmt;

use crate::models::validation::FieldErrors;
use crate::models::workflow::TransitionError;

/// Application-level errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Resource not found
    #[error("{0} not found")]
    NotFound(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Form payload failed validation; carries messages per field
    #[error("Error de validación en el formulario.")]
    Validation(FieldErrors),

    /// Authentication failed
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but the role does not allow the action
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The request conflicts with the current state of the resource
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Server-side failure outside the database
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let (status, error_code, response_message) = match self {
            AppError::Database(err_str) => {
                tracing::error!("Database error: {}", err_str);
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "An internal database error occurred".to_string(),
                )
            }
            AppError::NotFound(_) => (
                actix_web::http::StatusCode::NOT_FOUND,
                "NOT_FOUND",
                self.to_string(),
            ),
            AppError::InvalidInput(_) => (
                actix_web::http::StatusCode::BAD_REQUEST,
                "INVALID_INPUT",
                self.to_string(),
            ),
            AppError::Validation(_) => (
                actix_web::http::StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
                self.to_string(),
            ),
            AppError::Unauthorized(_) => (
                actix_web::http::StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                self.to_string(),
            ),
            AppError::Forbidden(_) => (
                actix_web::http::StatusCode::FORBIDDEN,
                "FORBIDDEN",
                self.to_string(),
            ),
            AppError::Conflict(_) => (
                actix_web::http::StatusCode::CONFLICT,
                "CONFLICT",
                self.to_string(),
            ),
            AppError::Internal(err_str) => {
                tracing::error!("Internal error: {}", err_str);
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let errors = match self {
            AppError::Validation(fields) => Some(fields.clone().into_map()),
            _ => None,
        };

        HttpResponse::build(status).json(ErrorResponse {
            error: error_code.to_string(),
            message: response_message,
            errors,
        })
    }
}

/// Error response body matching OpenAPI schema.
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    /// Field-keyed validation messages, present for `VALIDATION_ERROR`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ErrorResponse {
    pub fn new(error: &str, message: impl Into<String>) -> Self {
        Self {
            error: error.to_string(),
            message: message.into(),
            errors: None,
        }
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

// Conversion implementations for common error types

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::InvalidInput(format!("Invalid UUID: {}", err))
    }
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl From<TransitionError> for AppError {
    fn from(err: TransitionError) -> Self {
        AppError::Conflict(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_rt::test]
    async fn test_validation_error_carries_field_map() {
        let mut fields = FieldErrors::default();
        fields.add("client_name", "El nombre del cliente es obligatorio (min. 5 chars).");

        let resp = AppError::Validation(fields).error_response();
        assert_eq!(resp.status().as_u16(), 422);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "VALIDATION_ERROR");
        assert_eq!(
            json["errors"]["client_name"][0],
            "El nombre del cliente es obligatorio (min. 5 chars)."
        );
    }

    #[actix_rt::test]
    async fn test_database_error_hides_details() {
        let resp =
            AppError::Database("connection refused on 10.0.0.4".to_string()).error_response();
        assert_eq!(resp.status().as_u16(), 500);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "An internal database error occurred");
        assert!(json.get("errors").is_none());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Forbidden("x".into()).error_response().status().as_u16(),
            403
        );
        assert_eq!(
            AppError::Conflict("x".into()).error_response().status().as_u16(),
            409
        );
        assert_eq!(
            AppError::Internal("join error".into())
                .error_response()
                .status()
                .as_u16(),
            500
        );
        assert_eq!(
            AppError::NotFound("Assignment".into()).to_string(),
            "Assignment not found"
        );
    }
}
