//! HTTP server for the helpdesk chat agent
//!
//! Thin transport around the matching engine: one chat endpoint, a read-only
//! conversation log endpoint and health checks.

pub mod http;
pub mod state;

pub use http::create_router;
pub use state::AppState;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Server errors surfaced to HTTP clients
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Message cannot be empty.")]
    EmptyMessage,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            ServerError::EmptyMessage => StatusCode::BAD_REQUEST,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_message_maps_to_bad_request() {
        assert_eq!(ServerError::EmptyMessage.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ServerError::EmptyMessage.to_string(), "Message cannot be empty.");
    }

    #[test]
    fn test_internal_maps_to_500() {
        let err = ServerError::Internal("boom".to_string());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
