//! Error types shared by the registry and the HTTP layer

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Failures surfaced by registry operations.
///
/// `InvalidUrl` and `NotFound` are deterministic, user-facing failures.
/// `CodeSpaceExhausted` signals that code generation kept colliding past
/// its retry cap, which means the code length no longer fits the number
/// of stored entries.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("please provide a valid URL")]
    InvalidUrl,

    #[error("short URL not found")]
    NotFound,

    #[error("short code space exhausted")]
    CodeSpaceExhausted,
}

impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        let status = match self {
            RegistryError::InvalidUrl => StatusCode::BAD_REQUEST,
            RegistryError::NotFound => StatusCode::NOT_FOUND,
            RegistryError::CodeSpaceExhausted => {
                tracing::error!("short code generation exhausted its retry cap");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
