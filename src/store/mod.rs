//! Store Module
//!
//! Key-value store client used by the user handlers. Records are hashes
//! (field name to string value) addressed by string keys.

mod memory;
mod pattern;
mod redis_store;
mod retry;

use std::collections::HashMap;

use async_trait::async_trait;

pub use memory::MemoryStore;
pub use pattern::glob_match;
pub use redis_store::RedisStore;
pub use retry::RetryPolicy;

use crate::error::StoreError;

// == Store Result ==
/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

// == KvStore Trait ==
/// Operations the handlers need from a key-value store.
///
/// Every call is an independent round trip; nothing here spans multiple keys
/// or fields atomically.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Returns true if `key` is present.
    async fn exists(&self, key: &str) -> StoreResult<bool>;

    /// Returns every field of the hash at `key`; empty if the key is absent.
    async fn get_all(&self, key: &str) -> StoreResult<HashMap<String, String>>;

    /// Sets a single hash field, creating the key if needed.
    async fn set_field(&self, key: &str, field: &str, value: &str) -> StoreResult<()>;

    /// Removes `key` entirely. Missing keys are not an error.
    async fn delete(&self, key: &str) -> StoreResult<()>;

    /// Lists keys matching a glob `pattern` (`*` and `?` wildcards).
    async fn list_keys(&self, pattern: &str) -> StoreResult<Vec<String>>;

    /// Closes the connection. Called once during shutdown.
    async fn close(&self) -> StoreResult<()>;
}
