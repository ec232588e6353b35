//! Memory Store Module
//!
//! In-process hash-of-hashes store with the same semantics as the Redis backend.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{glob_match, KvStore, StoreResult};

type Hash = HashMap<String, String>;

// == Memory Store ==
/// In-memory store, shared between clones.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// Hash records by key
    entries: Arc<RwLock<HashMap<String, Hash>>>,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Length ==
    /// Returns the number of keys held.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    // == Is Empty ==
    /// Returns true if no keys are held.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn exists(&self, key: &str) -> StoreResult<bool> {
        Ok(self.entries.read().await.contains_key(key))
    }

    async fn get_all(&self, key: &str) -> StoreResult<Hash> {
        Ok(self
            .entries
            .read()
            .await
            .get(key)
            .cloned()
            .unwrap_or_default())
    }

    async fn set_field(&self, key: &str, field: &str, value: &str) -> StoreResult<()> {
        self.entries
            .write()
            .await
            .entry(key.to_string())
            .or_default()
            .insert(field.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn list_keys(&self, pattern: &str) -> StoreResult<Vec<String>> {
        let mut keys: Vec<String> = self
            .entries
            .read()
            .await
            .keys()
            .filter(|key| glob_match(pattern, key))
            .cloned()
            .collect();
        keys.sort();
        Ok(keys)
    }

    async fn close(&self) -> StoreResult<()> {
        Ok(())
    }
}
