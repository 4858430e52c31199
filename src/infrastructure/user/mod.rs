//! User infrastructure module
//!
//! This module provides the storage and credential implementations for user
//! accounts: Argon2 password hashing, in-memory and Postgres repositories,
//! and the user service.

mod password;
mod postgres_repository;
mod repository;
mod service;

pub use password::{Argon2Hasher, PasswordHasher};
pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;
pub use service::UserService;
