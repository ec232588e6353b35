//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::warn;

/// Which key-value backend the server talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// A Redis server at `redis_host:redis_port`
    Redis,
    /// An in-process store, lost on restart
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(StoreBackend::Redis),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown store backend: {}", other)),
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Redis host name or address
    pub redis_host: String,
    /// Redis port
    pub redis_port: u16,
    /// Store backend selection
    pub store_backend: StoreBackend,
    /// Directory served as static assets
    pub public_dir: PathBuf,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PORT` - HTTP server port (default: 3000)
    /// - `REDIS_HOST` - Redis host (default: 127.0.0.1)
    /// - `REDIS_PORT` - Redis port (default: 6379)
    /// - `STORE_BACKEND` - `redis` or `memory` (default: redis)
    /// - `PUBLIC_DIR` - Static asset directory (default: public)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("PORT").unwrap_or(defaults.server_port),
            redis_host: env::var("REDIS_HOST")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.redis_host),
            redis_port: parse_var("REDIS_PORT").unwrap_or(defaults.redis_port),
            store_backend: parse_backend(env::var("STORE_BACKEND").ok(), defaults.store_backend),
            public_dir: env::var("PUBLIC_DIR")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.public_dir),
        }
    }

    /// Connection URL for the configured Redis server.
    pub fn redis_url(&self) -> String {
        format!("redis://{}:{}/", self.redis_host, self.redis_port)
    }
}

/// Parses `STORE_BACKEND`, warning and keeping `default` on an unknown value.
fn parse_backend(raw: Option<String>, default: StoreBackend) -> StoreBackend {
    match raw.as_deref().map(str::parse::<StoreBackend>) {
        None => default,
        Some(Ok(backend)) => backend,
        Some(Err(err)) => {
            warn!("Ignoring STORE_BACKEND: {}; using {:?}", err, default);
            default
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            redis_host: "127.0.0.1".to_string(),
            redis_port: 6379,
            store_backend: StoreBackend::Redis,
            public_dir: PathBuf::from("public"),
        }
    }
}
