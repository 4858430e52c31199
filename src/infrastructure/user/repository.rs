//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::DomainError;
use crate::domain::user::{UserAccount, UserId, UserRepository, UserSummary};

#[derive(Debug, Default)]
struct State {
    /// Accounts keyed by id; BTreeMap keeps listings id-ordered
    users: BTreeMap<i64, UserAccount>,
    /// Index for username -> id lookup
    username_index: HashMap<String, i64>,
    next_id: i64,
}

/// In-memory implementation of UserRepository.
///
/// Backs the `memory` storage backend and most tests. Nothing survives
/// a restart.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    state: Arc<RwLock<State>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<UserAccount, DomainError> {
        let mut state = self.state.write().await;

        if state.username_index.contains_key(username) {
            return Err(DomainError::conflict(format!(
                "Username '{}' already exists",
                username
            )));
        }

        state.next_id += 1;
        let id = state.next_id;
        let account = UserAccount::new(UserId::new(id), username, password_hash);

        state.username_index.insert(username.to_string(), id);
        state.users.insert(id, account.clone());

        Ok(account)
    }

    async fn find(&self, id: UserId) -> Result<Option<UserAccount>, DomainError> {
        let state = self.state.read().await;
        Ok(state.users.get(&id.as_i64()).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserAccount>, DomainError> {
        let state = self.state.read().await;

        Ok(state
            .username_index
            .get(username)
            .and_then(|id| state.users.get(id))
            .cloned())
    }

    async fn list(&self) -> Result<Vec<UserSummary>, DomainError> {
        let state = self.state.read().await;
        Ok(state.users.values().map(UserSummary::from).collect())
    }

    async fn update_credentials(
        &self,
        id: UserId,
        username: &str,
        password_hash: &str,
    ) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;

        let Some(old_username) = state.users.get(&id.as_i64()).map(|u| u.username().to_string())
        else {
            return Ok(false);
        };

        if old_username != username {
            if state.username_index.contains_key(username) {
                return Err(DomainError::conflict(format!(
                    "Username '{}' already exists",
                    username
                )));
            }

            state.username_index.remove(&old_username);
            state.username_index.insert(username.to_string(), id.as_i64());
        }

        let account = state
            .users
            .get_mut(&id.as_i64())
            .ok_or_else(|| DomainError::internal("Account vanished while holding write lock"))?;
        account.set_username(username);
        account.set_password_hash(password_hash);

        Ok(true)
    }

    async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;

        match state.users.remove(&id.as_i64()) {
            Some(account) => {
                state.username_index.remove(account.username());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
