//! API Routes
//!
//! Configures the Axum router with all user API endpoints.

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use super::handlers::{health_handler, root_handler, AppState};
use super::users::{create_user, delete_user, get_user, list_users, update_user};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /` - Discovery document
/// - `GET /health` - Health check endpoint
/// - `GET /user` - List users
/// - `POST /user` - Create a user
/// - `GET /user/:username` - Fetch a user
/// - `PUT /user/:username` - Update some fields of a user
/// - `DELETE /user/:username` - Delete a user
///
/// Any other path is looked up in the static asset directory.
///
/// # Middleware
/// - CORS: any origin, the four API methods and `Content-Type`
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE]);

    let assets = ServeDir::new(&state.public_dir);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .merge(user_routes())
        .fallback_service(assets)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user", get(list_users).post(create_user))
        .route(
            "/user/:username",
            get(get_user).put(update_user).delete(delete_user),
        )
}
