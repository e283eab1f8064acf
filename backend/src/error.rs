//! Error handling for the PharmaFlow API
//!
//! Every failure renders as `{ "error": "<message>" }` with a machine code;
//! validation failures add the per-field details.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::validation::{FieldError, ValidationErrors};
use thiserror::Error;

use crate::services::auth::AuthError;
use crate::storage::StorageError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(#[from] AuthError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Storage(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorResponse {
        match self {
            AppError::Validation(errors) => ErrorResponse {
                error: errors.first_message().to_string(),
                code: "VALIDATION_ERROR",
                details: Some(errors.iter().cloned().collect()),
            },
            AppError::BadRequest(msg) => ErrorResponse {
                error: msg.clone(),
                code: "BAD_REQUEST",
                details: None,
            },
            AppError::NotFound(resource) => ErrorResponse {
                error: format!("{} not found", resource),
                code: "NOT_FOUND",
                details: None,
            },
            AppError::Unauthorized(err) => ErrorResponse {
                error: err.to_string(),
                code: "UNAUTHORIZED",
                details: None,
            },
            // Storage and internal details stay in the log
            AppError::Storage(_) => ErrorResponse {
                error: "The inventory could not be saved".to_string(),
                code: "STORAGE_ERROR",
                details: None,
            },
            AppError::Internal(_) => ErrorResponse {
                error: "An internal server error occurred".to_string(),
                code: "INTERNAL_ERROR",
                details: None,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }

        (status, Json(self.body())).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(format!("Invalid data: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::MedicationCandidate;
    use shared::validation::{validate_medication, NAME_REQUIRED};

    #[test]
    fn test_validation_error_uses_first_message() {
        let errors = validate_medication(&MedicationCandidate::default()).unwrap_err();
        let err = AppError::from(errors);

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        let body = serde_json::to_value(err.body()).unwrap();
        assert_eq!(body["error"], NAME_REQUIRED);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["details"].as_array().unwrap().len(), 6);
    }

    #[test]
    fn test_not_found_body() {
        let err = AppError::NotFound("Medication".to_string());
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        let body = serde_json::to_value(err.body()).unwrap();
        assert_eq!(body["error"], "Medication not found");
        assert!(body.get("details").is_none());
    }

    #[test]
    fn test_storage_error_hides_details() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only fs");
        let err = AppError::from(StorageError::from(io));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = serde_json::to_value(err.body()).unwrap();
        assert_eq!(body["error"], "The inventory could not be saved");
    }
}
