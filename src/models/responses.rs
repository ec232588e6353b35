//! Response DTOs for the user API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::collections::BTreeMap;

use serde::Serialize;

use super::user::User;

/// Response body for GET /user
#[derive(Debug, Clone, Serialize)]
pub struct UserListResponse {
    pub users: Vec<User>,
    pub count: usize,
}

impl UserListResponse {
    /// Creates a list response; `count` always equals `users.len()`.
    pub fn new(users: Vec<User>) -> Self {
        Self {
            count: users.len(),
            users,
        }
    }
}

/// Confirmation body for create, update and delete.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    /// Success message
    pub message: String,
    /// The user the operation applied to
    pub username: String,
}

impl MessageResponse {
    pub fn created(username: impl Into<String>) -> Self {
        Self::new("User created successfully", username)
    }

    pub fn updated(username: impl Into<String>) -> Self {
        Self::new("User updated successfully", username)
    }

    pub fn deleted(username: impl Into<String>) -> Self {
        Self::new("User deleted successfully", username)
    }

    fn new(message: &str, username: impl Into<String>) -> Self {
        Self {
            message: message.to_string(),
            username: username.into(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
    /// Seconds since the server started
    pub uptime: f64,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(uptime: f64) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            uptime,
        }
    }
}

/// Discovery document served at GET /
#[derive(Debug, Clone, Serialize)]
pub struct RootResponse {
    pub message: String,
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

impl Default for RootResponse {
    fn default() -> Self {
        Self {
            message: "User API".to_string(),
            endpoints: BTreeMap::from([
                ("health", "/health"),
                ("listUsers", "GET /user"),
                ("createUser", "POST /user"),
                ("getUser", "GET /user/:username"),
                ("updateUser", "PUT /user/:username"),
                ("deleteUser", "DELETE /user/:username"),
            ]),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
