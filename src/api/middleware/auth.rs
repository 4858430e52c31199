//! Bearer-token extractors for access- and refresh-guarded routes

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::infrastructure::auth::{TokenClaims, TokenKind};

/// Extractor that requires a valid access token in the
/// `Authorization: Bearer <token>` header
#[derive(Debug, Clone)]
pub struct RequireAccessToken(pub TokenClaims);

impl FromRequestParts<AppState> for RequireAccessToken {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;

        debug!("Verifying access token");
        let claims = state.token_service.verify(&token, TokenKind::Access)?;

        Ok(Self(claims))
    }
}

/// Extractor that requires a valid refresh token in the
/// `Authorization: Bearer <token>` header.
///
/// An access token presented here is rejected; the two roles are not
/// interchangeable.
#[derive(Debug, Clone)]
pub struct RequireRefreshToken(pub TokenClaims);

impl FromRequestParts<AppState> for RequireRefreshToken {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;

        debug!("Verifying refresh token");
        let claims = state.token_service.verify(&token, TokenKind::Refresh)?;

        Ok(Self(claims))
    }
}

/// Pull the token out of `Authorization: Bearer <token>`
fn bearer_token(headers: &HeaderMap) -> Result<String, ApiError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(missing_token_error)?
        .to_str()
        .map_err(|_| ApiError::unauthorized("Invalid Authorization header encoding"))?;

    match value.strip_prefix("Bearer ") {
        Some(token) => Ok(token.trim().to_string()),
        None => Err(missing_token_error()),
    }
}

fn missing_token_error() -> ApiError {
    ApiError::unauthorized(
        "Authentication required. Provide a token via 'Authorization: Bearer <token>' header",
    )
}
