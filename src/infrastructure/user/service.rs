//! User service: registration, credential checks, and account management

use std::sync::Arc;

use crate::domain::DomainError;
use crate::domain::user::{
    UserAccount, UserId, UserRepository, UserSummary, validate_password, validate_username,
};

use super::password::PasswordHasher;

/// Orchestrates account operations over a repository and a password hasher
#[derive(Debug)]
pub struct UserService<R: UserRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R: UserRepository, H: PasswordHasher> UserService<R, H> {
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }

    /// Register a new account
    pub async fn register(
        &self,
        username: &str,
        password: &str,
    ) -> Result<UserAccount, DomainError> {
        validate_username(username).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(password).map_err(|e| DomainError::validation(e.to_string()))?;

        // Early duplicate check for a clean message; the unique index still
        // catches the race at insert time.
        if self.repository.username_exists(username).await? {
            return Err(DomainError::conflict(format!(
                "Username '{}' already exists",
                username
            )));
        }

        let password_hash = self.hasher.hash(password)?;

        self.repository.insert(username, &password_hash).await
    }

    /// Check a username/password pair.
    ///
    /// Returns `Ok(None)` when the username is unknown or the password does
    /// not match; the caller decides how to surface that.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserAccount>, DomainError> {
        let Some(account) = self.repository.find_by_username(username).await? else {
            return Ok(None);
        };

        if !self.hasher.verify(password, account.password_hash()) {
            return Ok(None);
        }

        Ok(Some(account))
    }

    /// List all accounts without credential material
    pub async fn list(&self) -> Result<Vec<UserSummary>, DomainError> {
        self.repository.list().await
    }

    /// Overwrite username and password for an account.
    ///
    /// An absent id is treated as success, mirroring delete: the caller
    /// cannot distinguish it from an update followed by a delete.
    pub async fn update_credentials(
        &self,
        id: UserId,
        username: &str,
        password: &str,
    ) -> Result<(), DomainError> {
        validate_username(username).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(password).map_err(|e| DomainError::validation(e.to_string()))?;

        let password_hash = self.hasher.hash(password)?;

        self.repository
            .update_credentials(id, username, &password_hash)
            .await?;

        Ok(())
    }

    /// Delete an account; succeeds whether or not the id exists
    pub async fn delete(&self, id: UserId) -> Result<(), DomainError> {
        self.repository.delete(id).await?;
        Ok(())
    }
}
