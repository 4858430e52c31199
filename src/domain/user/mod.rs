//! User domain
//!
//! This module provides domain types and traits for user accounts,
//! including the entity, credential validation, and the repository trait.

mod entity;
mod repository;
mod validation;

pub use entity::{UserAccount, UserId, UserSummary};
pub use repository::UserRepository;
pub use validation::{UserValidationError, validate_password, validate_username};

#[cfg(test)]
pub use repository::mock::MockUserRepository;
