//! Backend Error Types
//!
//! HTTP-facing error type for the API layer. Wraps the shared messaging
//! taxonomy and maps each variant to a status code and JSON body.
//!
//! # Status Code Mapping
//!
//! - `InvalidIdentifier`, `EmptyMessage`, `ContentTooLong` - 400 Bad Request
//! - `ThreadNotFound` - 404 Not Found (also covers non-participant access)
//! - `Directory` - 502 Bad Gateway
//! - `Database` - 500 Internal Server Error
//! - `BadRequest` - 400 Bad Request (handler-level rejections)
//! - `MissingIdentity` - 401 Unauthorized (gateway identity header absent)

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::shared::MessagingError;

/// API-layer error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Error from the messaging services
    #[error(transparent)]
    Messaging(#[from] MessagingError),

    /// Request rejected by the handler before reaching a service
    #[error("{message}")]
    BadRequest {
        /// Human-readable error message
        message: String,
    },

    /// The gateway-set identity header is missing or malformed
    #[error("missing or malformed x-user-id header")]
    MissingIdentity,
}

impl ApiError {
    /// Create a handler-level bad-request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Messaging(err) => match err {
                MessagingError::InvalidIdentifier { .. }
                | MessagingError::EmptyMessage
                | MessagingError::ContentTooLong => StatusCode::BAD_REQUEST,
                MessagingError::ThreadNotFound => StatusCode::NOT_FOUND,
                MessagingError::Directory { .. } => StatusCode::BAD_GATEWAY,
                MessagingError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::MissingIdentity => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "request failed");
        } else {
            tracing::debug!(status = %status, error = %self, "request rejected");
        }

        // Internal details stay out of the response body.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
