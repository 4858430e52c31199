//! Roster
//!
//! A small user directory: accounts with store-assigned ids, unique
//! usernames, and salted password hashes, exposed over HTTP with JWT
//! access/refresh tokens. Ships with an interactive admin console that
//! drives the same API.

pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

use api::state::AppState;
use config::StorageBackend;
use infrastructure::auth::{JwtService, TokenConfig};
use infrastructure::user::{
    Argon2Hasher, InMemoryUserRepository, PostgresUserRepository, UserService,
};

/// Create the application state with all services initialized
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let hasher = Arc::new(Argon2Hasher::new());

    let user_service: Arc<dyn api::state::UserServiceTrait> = match config.database.backend {
        StorageBackend::Memory => {
            info!("Using in-memory user storage; accounts vanish on restart");
            Arc::new(UserService::new(
                Arc::new(InMemoryUserRepository::new()),
                hasher,
            ))
        }
        StorageBackend::Postgres => {
            info!("Connecting to PostgreSQL...");
            let pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(&config.database.url)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to connect to PostgreSQL: {}", e))?;

            let repository = PostgresUserRepository::new(pool);
            repository.ensure_schema().await?;
            info!("PostgreSQL connection established");

            Arc::new(UserService::new(Arc::new(repository), hasher))
        }
    };

    if config.auth.secret == TokenConfig::default().secret {
        warn!(
            "Signing tokens with the built-in default secret. \
            Set JWT_SECRET_KEY (or auth.secret) before exposing this server."
        );
    }

    let token_service = Arc::new(JwtService::new(TokenConfig::new(
        config.auth.secret.clone(),
        config.auth.access_ttl_secs,
        config.auth.refresh_ttl_secs,
    )));

    Ok(AppState::new(user_service, token_service))
}
