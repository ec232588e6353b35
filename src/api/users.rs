//! User Handlers
//!
//! CRUD endpoints for user records mounted under `/user`. Each handler is a
//! single pass against the store: check existence, then read or write fields
//! one round trip at a time.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, info};

use super::extract::Payload;
use super::handlers::AppState;
use crate::error::{ApiError, Result};
use crate::models::{
    user_key, username_from_key, CreateUserRequest, MessageResponse, UpdateUserRequest, User,
    UserListResponse, USER_KEY_PATTERN,
};

const MISSING_FIELDS: &str = "Missing required fields";
const USER_EXISTS: &str = "User already exists";
const USER_NOT_FOUND: &str = "User not found";
const NO_FIELDS: &str = "No fields to update";

/// Handler for GET /user
///
/// Lists every stored user. Unbounded; there is no pagination.
pub async fn list_users(State(state): State<AppState>) -> Result<Json<UserListResponse>> {
    let keys = state
        .store
        .list_keys(USER_KEY_PATTERN)
        .await
        .map_err(ApiError::store("getting users"))?;

    let mut users = Vec::with_capacity(keys.len());
    for key in keys {
        let Some(username) = username_from_key(&key) else {
            continue;
        };
        let fields = state
            .store
            .get_all(&key)
            .await
            .map_err(ApiError::store("getting users"))?;
        // Deleted between listing and fetching
        if fields.is_empty() {
            continue;
        }
        users.push(User::from_fields(username, fields));
    }

    debug!(count = users.len(), "Listed users");
    Ok(Json(UserListResponse::new(users)))
}

/// Handler for POST /user
///
/// Fields are written one at a time; a store failure part way through leaves
/// the earlier fields in place.
pub async fn create_user(
    State(state): State<AppState>,
    Payload(req): Payload<CreateUserRequest>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let user = req
        .into_new_user()
        .ok_or_else(|| ApiError::InvalidRequest(MISSING_FIELDS.to_string()))?;
    let key = user_key(&user.username);

    let exists = state
        .store
        .exists(&key)
        .await
        .map_err(ApiError::store("creating user"))?;
    if exists {
        return Err(ApiError::Conflict(USER_EXISTS.to_string()));
    }

    for (field, value) in user.fields() {
        state
            .store
            .set_field(&key, field, value)
            .await
            .map_err(ApiError::store("creating user"))?;
    }

    info!(username = %user.username, "User created");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::created(user.username)),
    ))
}

/// Handler for GET /user/:username
pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<User>> {
    let key = user_key(&username);
    ensure_exists(&state, &key, "getting user").await?;

    let fields = state
        .store
        .get_all(&key)
        .await
        .map_err(ApiError::store("getting user"))?;

    Ok(Json(User::from_fields(username, fields)))
}

/// Handler for PUT /user/:username
///
/// Only non-empty `firstname`, `lastname` and `email` values are applied.
/// Existence is checked before the payload, so a missing user is a 404 even
/// when the payload is empty.
pub async fn update_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Payload(req): Payload<UpdateUserRequest>,
) -> Result<Json<MessageResponse>> {
    let key = user_key(&username);
    ensure_exists(&state, &key, "updating user").await?;

    let changes = req.changes();
    if changes.is_empty() {
        return Err(ApiError::InvalidRequest(NO_FIELDS.to_string()));
    }

    for (field, value) in changes {
        state
            .store
            .set_field(&key, field, value)
            .await
            .map_err(ApiError::store("updating user"))?;
    }

    info!(%username, "User updated");
    Ok(Json(MessageResponse::updated(username)))
}

/// Handler for DELETE /user/:username
pub async fn delete_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<MessageResponse>> {
    let key = user_key(&username);
    ensure_exists(&state, &key, "deleting user").await?;

    state
        .store
        .delete(&key)
        .await
        .map_err(ApiError::store("deleting user"))?;

    info!(%username, "User deleted");
    Ok(Json(MessageResponse::deleted(username)))
}

async fn ensure_exists(state: &AppState, key: &str, context: &'static str) -> Result<()> {
    let exists = state
        .store
        .exists(key)
        .await
        .map_err(ApiError::store(context))?;
    if exists {
        Ok(())
    } else {
        Err(ApiError::NotFound(USER_NOT_FOUND.to_string()))
    }
}
