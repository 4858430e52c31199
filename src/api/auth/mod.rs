//! Authentication API endpoints
//!
//! Provides registration, login, token refresh, and a token-gated probe
//! endpoint for JWT-based authentication.

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::api::middleware::{RequireAccessToken, RequireRefreshToken};
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{UserAccount, UserId};
use crate::infrastructure::auth::TokenPair;

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/protected", get(protected))
}

/// Registration request.
///
/// Fields default to empty strings so that absent fields reach the
/// validation layer and come back as 400 rather than a serde rejection.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Public view of a newly registered account
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub id: UserId,
    pub username: String,
}

impl RegisterResponse {
    fn from_account(account: &UserAccount) -> Self {
        Self {
            id: account.id(),
            username: account.username().to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Refresh response carrying a fresh access token
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

/// Response for the token-gated probe endpoint
#[derive(Debug, Serialize)]
pub struct ProtectedResponse {
    pub logged_in_as: String,
}

/// Register a new account
///
/// POST /register
///
/// Returns 201 with the assigned id on success, 400 when the username is
/// taken or a field is empty.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let account = state
        .user_service
        .register(&request.username, &request.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse::from_account(&account)),
    ))
}

/// Login with username and password
///
/// POST /login
///
/// Returns an access/refresh token pair on successful authentication.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenPair>, ApiError> {
    let account = state
        .user_service
        .authenticate(&request.username, &request.password)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid username or password"))?;

    let pair = state.token_service.issue_pair(account.username())?;

    Ok(Json(pair))
}

/// Exchange a refresh token for a new access token
///
/// POST /refresh
///
/// The refresh token is presented as a bearer token. Access tokens are
/// rejected here, so a leaked short-lived token cannot mint new ones.
pub async fn refresh(
    State(state): State<AppState>,
    RequireRefreshToken(claims): RequireRefreshToken,
) -> Result<Json<RefreshResponse>, ApiError> {
    let access_token = state.token_service.issue_access(claims.username())?;

    Ok(Json(RefreshResponse { access_token }))
}

/// Report the identity bound to the presented access token
///
/// GET /protected
pub async fn protected(
    RequireAccessToken(claims): RequireAccessToken,
) -> Result<Json<ProtectedResponse>, ApiError> {
    Ok(Json(ProtectedResponse {
        logged_in_as: claims.sub,
    }))
}
