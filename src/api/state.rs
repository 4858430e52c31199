//! Application state for shared services

use std::sync::Arc;

use crate::domain::DomainError;
use crate::domain::user::{UserAccount, UserId, UserRepository, UserSummary};
use crate::infrastructure::auth::TokenIssuer;
use crate::infrastructure::user::{PasswordHasher, UserService};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub token_service: Arc<dyn TokenIssuer>,
}

/// Object-safe view of the user service for handlers
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn register(&self, username: &str, password: &str) -> Result<UserAccount, DomainError>;
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserAccount>, DomainError>;
    async fn list(&self) -> Result<Vec<UserSummary>, DomainError>;
    async fn update_credentials(
        &self,
        id: UserId,
        username: &str,
        password: &str,
    ) -> Result<(), DomainError>;
    async fn delete(&self, id: UserId) -> Result<(), DomainError>;
}

#[async_trait::async_trait]
impl<R, H> UserServiceTrait for UserService<R, H>
where
    R: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    async fn register(&self, username: &str, password: &str) -> Result<UserAccount, DomainError> {
        UserService::register(self, username, password).await
    }

    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserAccount>, DomainError> {
        UserService::authenticate(self, username, password).await
    }

    async fn list(&self) -> Result<Vec<UserSummary>, DomainError> {
        UserService::list(self).await
    }

    async fn update_credentials(
        &self,
        id: UserId,
        username: &str,
        password: &str,
    ) -> Result<(), DomainError> {
        UserService::update_credentials(self, id, username, password).await
    }

    async fn delete(&self, id: UserId) -> Result<(), DomainError> {
        UserService::delete(self, id).await
    }
}

impl AppState {
    /// Create new application state with provided services
    pub fn new(
        user_service: Arc<dyn UserServiceTrait>,
        token_service: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            user_service,
            token_service,
        }
    }
}
