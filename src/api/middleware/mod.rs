//! API middleware components

pub mod auth;
pub mod logging;

pub use auth::{RequireAccessToken, RequireRefreshToken};
pub use logging::log_requests;
