//! API Handlers
//!
//! Shared application state plus the service-level endpoints (health and
//! discovery). User endpoints live in [`super::users`].

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, Json};

use crate::models::{HealthResponse, RootResponse};
use crate::store::KvStore;

/// Application state shared across all handlers.
///
/// Holds the one store client created at startup.
#[derive(Clone)]
pub struct AppState {
    /// Store client shared by every request
    pub store: Arc<dyn KvStore>,
    /// When the server started, for uptime reporting
    pub started_at: Instant,
    /// Directory served as static assets
    pub public_dir: PathBuf,
}

impl AppState {
    /// Creates a new AppState around an existing store client.
    pub fn new(store: impl KvStore + 'static) -> Self {
        Self::from_arc(Arc::new(store))
    }

    /// Creates a new AppState from an already shared store client.
    pub fn from_arc(store: Arc<dyn KvStore>) -> Self {
        Self {
            store,
            started_at: Instant::now(),
            public_dir: PathBuf::from("public"),
        }
    }

    /// Sets the instant uptime is measured from, normally process start.
    pub fn with_started_at(mut self, started_at: Instant) -> Self {
        self.started_at = started_at;
        self
    }

    /// Sets the static asset directory.
    pub fn with_public_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.public_dir = dir.into();
        self
    }
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime = state.started_at.elapsed().as_secs_f64();
    Json(HealthResponse::healthy(uptime))
}

/// Handler for GET /
pub async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse::default())
}
