//! User API - A small REST service for user records
//!
//! Stores each user as a Redis hash and exposes CRUD endpoints over HTTP.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod store;

pub use api::AppState;
pub use config::Config;
pub use store::{KvStore, MemoryStore, RedisStore};
