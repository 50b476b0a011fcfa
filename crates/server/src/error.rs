//! Error types for the serving adapter

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Serving errors, mapped onto client-visible HTTP statuses
#[derive(Error, Debug)]
pub enum ServerError {
    /// The model produced output violating the summary contract.
    #[error("invalid summary: {0}")]
    InvalidSummary(#[from] sumprep_prep::Error),

    /// The upstream model call failed.
    #[error("model backend error: {0}")]
    Backend(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServerError::InvalidSummary(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::Backend(_) => StatusCode::BAD_GATEWAY,
        };
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
