//! # API Error Types
//!
//! Maps store and lifecycle errors to HTTP status codes with a JSON
//! `{ "error": { "code", "message" } }` body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use bastion_client::ErrorBody;
use bastion_state::LifecycleError;
use bastion_store::StoreError;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Role may not take this action in the current status (403).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Request input failed validation (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// Bad credentials or unknown token (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Conflict with current state (409).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Route not served by the stub (501).
    #[error("not implemented: {0}")]
    NotImplemented(String),
}

impl ApiError {
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            Self::NotImplemented(_) => (StatusCode::NOT_IMPLEMENTED, "NOT_IMPLEMENTED"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        tracing::info!(status = status.as_u16(), code, error = %self, "request refused");
        (status, Json(ErrorBody::new(code, self.to_string()))).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => Self::NotFound(err.to_string()),
            StoreError::DuplicateId(_) => Self::Conflict(err.to_string()),
            StoreError::Lifecycle(LifecycleError::Unauthorized { .. }) => {
                Self::Forbidden(err.to_string())
            }
            StoreError::Lifecycle(LifecycleError::Validation(_)) => {
                Self::Validation(err.to_string())
            }
        }
    }
}
