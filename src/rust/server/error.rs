use std::error::Error as _;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scorer::ScorerError;

/// Body of every failed response: `{"error": "<message>"}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Request-local failures of the HTTP surface.
///
/// Every variant renders as `500 Internal Server Error` with an [`ErrorResponse`]
/// body; callers tell failures apart by the message only.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request body could not be read
    #[error("Failed to read request body: {0}")]
    UnreadableBody(String),

    /// The body is not JSON or not a JSON object
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    /// A required field is absent from the body
    #[error("Missing required field '{0}'")]
    MissingField(&'static str),

    /// A field is present but has the wrong JSON type
    #[error("Field '{field}' must be a string, found {found}")]
    InvalidField {
        field: &'static str,
        found: &'static str,
    },

    /// Preprocessing or the model call failed
    #[error(transparent)]
    Scoring(#[from] ScorerError),

    /// The scoring task panicked or was cancelled
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        log::error!("Error during prediction: {}", self);
        let mut source = self.source();
        while let Some(cause) = source {
            log::error!("  caused by: {}", cause);
            source = cause.source();
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
