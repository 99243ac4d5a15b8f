//! Error types for the game API server.
//!
//! [`ApiError`] covers protocol-level failures only: malformed input and
//! serialization faults. Game *declines* (insufficient funds, occupied pot,
//! empty stock) are not errors at this layer; handlers report them as
//! `success: false` inside an HTTP 200 body, because a declined purchase is
//! a normal game outcome, not a broken request.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors that can occur in the game API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request was syntactically valid but semantically unacceptable.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Serialization(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("JSON error: {e}"))
            }
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
