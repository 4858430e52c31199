use axum::{Router, middleware, routing::get};
use tower_http::trace::TraceLayer;

use super::auth;
use super::health;
use super::middleware::log_requests;
use super::state::AppState;
use super::users;

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        // Registration, login, token refresh
        .merge(auth::create_auth_router())
        // User directory
        .merge(users::create_users_router())
        // Add state and middleware
        .with_state(state)
        .layer(middleware::from_fn(log_requests))
        .layer(TraceLayer::new_for_http())
}
