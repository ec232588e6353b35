//! Redis Store Module
//!
//! `KvStore` backed by a Redis server through a managed async connection.

use std::collections::HashMap;
use std::time::Instant;

use async_trait::async_trait;
use redis::aio::{ConnectionManager, MultiplexedConnection};
use redis::{AsyncCommands, Client};
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use super::{KvStore, RetryPolicy, StoreResult};
use crate::error::StoreError;

// == Redis Store ==
/// Redis-backed store.
///
/// Cloning is cheap; every clone shares the same managed connection, which
/// reconnects on its own if the link drops after startup.
#[derive(Clone)]
pub struct RedisStore {
    manager: ConnectionManager,
}

impl RedisStore {
    // == Connect ==
    /// Connects to `url`, retrying transient failures according to `policy`.
    ///
    /// A refused connection fails immediately. Otherwise the attempt is
    /// retried until it succeeds, the attempt budget runs out, or the total
    /// elapsed time passes the policy ceiling. An attempt that gets no reply
    /// within `policy.attempt_timeout` counts as a transient failure.
    pub async fn connect(url: &str, policy: RetryPolicy) -> StoreResult<Self> {
        let client = Client::open(url)?;
        let started = Instant::now();
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;

            let budget = policy.attempt_budget(started.elapsed());
            let last_error = match timeout(budget, ping_once(&client)).await {
                Ok(Ok(())) => break,
                Ok(Err(err)) if err.is_connection_refusal() => {
                    error!(url, error = %err, "The server refused the connection");
                    return Err(StoreError::ConnectionRefused(err.to_string()));
                }
                Ok(Err(err)) => err.to_string(),
                Err(_) => format!("no reply within {}ms", budget.as_millis()),
            };

            let elapsed = started.elapsed();
            if elapsed >= policy.max_elapsed {
                error!(url, attempt, error = %last_error, "Retry time exhausted");
                return Err(StoreError::RetryTimeExhausted {
                    elapsed_secs: elapsed.as_secs(),
                    last_error,
                });
            }
            if !policy.should_retry(attempt, elapsed) {
                error!(url, attempt, error = %last_error, "Giving up on Redis connection");
                return Err(StoreError::RetriesExhausted {
                    attempts: attempt,
                    last_error,
                });
            }

            let delay = policy.delay_for(attempt);
            warn!(
                url,
                attempt,
                backoff_ms = delay.as_millis() as u64,
                error = %last_error,
                "Redis connection failed, retrying"
            );
            tokio::time::sleep(delay).await;
        }

        let manager = timeout(policy.attempt_timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| StoreError::Timeout(url.to_string()))??;
        info!(url, attempt, "Redis client connected");

        Ok(Self { manager })
    }

    fn connection(&self) -> ConnectionManager {
        self.manager.clone()
    }
}

/// Opens a throwaway connection and pings the server.
async fn ping_once(client: &Client) -> redis::RedisResult<()> {
    let mut con: MultiplexedConnection = client.get_multiplexed_async_connection().await?;
    let _: String = redis::cmd("PING").query_async(&mut con).await?;
    Ok(())
}

#[async_trait]
impl KvStore for RedisStore {
    async fn exists(&self, key: &str) -> StoreResult<bool> {
        let mut con = self.connection();
        let found: bool = con.exists(key).await?;
        Ok(found)
    }

    async fn get_all(&self, key: &str) -> StoreResult<HashMap<String, String>> {
        let mut con = self.connection();
        let fields: HashMap<String, String> = con.hgetall(key).await?;
        Ok(fields)
    }

    async fn set_field(&self, key: &str, field: &str, value: &str) -> StoreResult<()> {
        let mut con = self.connection();
        let _: () = con.hset(key, field, value).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        let mut con = self.connection();
        let _: () = con.del(key).await?;
        Ok(())
    }

    async fn list_keys(&self, pattern: &str) -> StoreResult<Vec<String>> {
        let mut con = self.connection();
        let keys: Vec<String> = con.keys(pattern).await?;
        debug!(pattern, count = keys.len(), "Listed keys");
        Ok(keys)
    }

    async fn close(&self) -> StoreResult<()> {
        let mut con = self.connection();
        let _: () = redis::cmd("QUIT").query_async(&mut con).await?;
        info!("Redis connection closed");
        Ok(())
    }
}
