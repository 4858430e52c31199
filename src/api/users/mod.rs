//! User directory endpoints
//!
//! Listing, credential updates, and deletion. None of these demand a
//! token or proof of ownership; any caller may rewrite or remove any
//! account. Deployments that need per-account protection must put an
//! authorization layer in front of these routes.

use axum::{
    Router,
    extract::{Path, State},
    routing::{get, put},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{UserId, UserSummary};

/// Create the user directory router
pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/{id}", put(update_user).delete(delete_user))
}

/// Request to replace a user's credentials
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Confirmation message returned by write endpoints
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// GET /users
///
/// Returns every account as a bare array of public summaries.
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserSummary>>, ApiError> {
    debug!("Listing all users");

    let users = state.user_service.list().await?;

    Ok(Json(users))
}

/// PUT /users/{id}
///
/// Replaces both username and password unconditionally. Succeeds even
/// when the id does not exist.
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    debug!(user_id = %user_id, "Updating user credentials");

    state
        .user_service
        .update_credentials(UserId::from(user_id), &request.username, &request.password)
        .await?;

    Ok(Json(MessageResponse {
        message: "User updated".to_string(),
    }))
}

/// DELETE /users/{id}
///
/// Idempotent; deleting an absent id still reports success.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    debug!(user_id = %user_id, "Deleting user");

    state.user_service.delete(UserId::from(user_id)).await?;

    Ok(Json(MessageResponse {
        message: "User deleted".to_string(),
    }))
}
