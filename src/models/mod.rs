//! Request and Response models for the user API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies, and the
//! layout of user records in the store.

pub mod requests;
pub mod responses;
pub mod user;

// Re-export commonly used types
pub use requests::{CreateUserRequest, UpdateUserRequest};
pub use responses::{
    ErrorResponse, HealthResponse, MessageResponse, RootResponse, UserListResponse,
};
pub use user::{user_key, username_from_key, NewUser, User, USER_KEY_PATTERN};
