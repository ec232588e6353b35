//! API Module
//!
//! HTTP handlers and routing for the user REST API.
//!
//! # Endpoints
//! - `GET /` - Discovery document
//! - `GET /health` - Health check endpoint
//! - `GET /user`, `POST /user` - List and create users
//! - `GET|PUT|DELETE /user/:username` - Read, update and delete a user

pub mod extract;
pub mod handlers;
pub mod routes;
pub mod users;

#[cfg(test)]
mod property_tests;

pub use handlers::*;
pub use routes::create_router;
