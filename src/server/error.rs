//! Mapping of store and extraction failures onto HTTP responses.
//!
//! Every error body has the shape `{"detail": "<message>"}`.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

pub const DUPLICATE_ID_DETAIL: &str = "User ID already exists.";
pub const NOT_FOUND_DETAIL: &str = "User not found.";
pub const INTERNAL_DETAIL: &str = "Internal Server Error";

/// Errors surfaced by request handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The path or body could not be parsed into the expected types.
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    /// Status code and client-facing message for this error.
    pub fn status_and_detail(&self) -> (StatusCode, String) {
        match self {
            ApiError::Store(StoreError::DuplicateKey { .. }) => {
                (StatusCode::BAD_REQUEST, DUPLICATE_ID_DETAIL.to_string())
            }
            ApiError::Store(StoreError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, NOT_FOUND_DETAIL.to_string())
            }
            ApiError::Validation(reason) => (StatusCode::UNPROCESSABLE_ENTITY, reason.clone()),
            ApiError::Store(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_DETAIL.to_string(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = self.status_and_detail();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(%status, error = %self, "client error");
        }
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}
