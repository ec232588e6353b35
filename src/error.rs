//! Error types for the user API
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

// == Store Error ==
/// Failure talking to the key-value store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The server actively refused the connection
    #[error("The server refused the connection: {0}")]
    ConnectionRefused(String),

    /// Connection attempts ran out before one succeeded
    #[error("Connection failed after {attempts} attempts: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },

    /// Total retry time passed its ceiling
    #[error("Retry time exhausted after {elapsed_secs}s: {last_error}")]
    RetryTimeExhausted { elapsed_secs: u64, last_error: String },

    /// Connection set-up got no reply in time
    #[error("Timed out connecting to {0}")]
    Timeout(String),

    /// Any error reported by the Redis client
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

// == API Error Enum ==
/// Unified error type for the HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing, empty or malformed request data
    #[error("{0}")]
    InvalidRequest(String),

    /// Resource already exists
    #[error("{0}")]
    Conflict(String),

    /// Resource not found
    #[error("{0}")]
    NotFound(String),

    /// Store failure while performing `context`
    #[error("Error {context}: {source}")]
    Store {
        context: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    /// Returns a mapper that tags a store failure with the operation in progress.
    ///
    /// Meant for `.map_err(ApiError::store("getting user"))`.
    pub fn store(context: &'static str) -> impl FnOnce(StoreError) -> ApiError {
        move |source| ApiError::Store { context, source }
    }

    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::InvalidRequest(msg) | ApiError::Conflict(msg) | ApiError::NotFound(msg) => {
                msg.clone()
            }
            ApiError::Store { context, source } => {
                // Details stay in the log, never in the response
                error!(error = %source, "Error {}", context);
                "Internal server error".to_string()
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the HTTP handlers.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::InvalidRequest("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::Conflict("x".into()).status(), StatusCode::CONFLICT);
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);

        let err = ApiError::store("listing users")(StoreError::ConnectionRefused(
            "127.0.0.1:6379".into(),
        ));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_store_error_hides_details() {
        let err = ApiError::store("creating user")(StoreError::RetriesExhausted {
            attempts: 10,
            last_error: "secret-host unreachable".into(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        assert_eq!(body, r#"{"error":"Internal server error"}"#);
    }

    #[test]
    fn test_store_error_display_keeps_context() {
        let err = ApiError::store("deleting user")(StoreError::ConnectionRefused(
            "localhost".into(),
        ));
        assert!(err.to_string().starts_with("Error deleting user"));
    }
}
