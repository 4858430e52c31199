//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{UserAccount, UserId, UserSummary};
use crate::domain::DomainError;

/// Repository trait for user-account storage
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Insert a new account; the store assigns the id
    async fn insert(&self, username: &str, password_hash: &str)
    -> Result<UserAccount, DomainError>;

    /// Get an account by id
    async fn find(&self, id: UserId) -> Result<Option<UserAccount>, DomainError>;

    /// Get an account by username (for login)
    async fn find_by_username(&self, username: &str) -> Result<Option<UserAccount>, DomainError>;

    /// List all accounts as password-free summaries, ordered by id
    async fn list(&self) -> Result<Vec<UserSummary>, DomainError>;

    /// Overwrite username and password hash for an id.
    /// Returns false when no such row exists.
    async fn update_credentials(
        &self,
        id: UserId,
        username: &str,
        password_hash: &str,
    ) -> Result<bool, DomainError>;

    /// Delete an account. Returns false when no such row exists.
    async fn delete(&self, id: UserId) -> Result<bool, DomainError>;

    /// Check if a username is already taken
    async fn username_exists(&self, username: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_username(username).await?.is_some())
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// Mock user repository with a failure toggle for exercising storage-error paths
    #[derive(Debug, Default)]
    pub struct MockUserRepository {
        users: Arc<RwLock<BTreeMap<i64, UserAccount>>>,
        next_id: Arc<RwLock<i64>>,
        should_fail: Arc<RwLock<bool>>,
    }

    impl MockUserRepository {
        pub fn new() -> Self {
            Self::default()
        }

        /// Set whether operations should fail
        pub async fn set_should_fail(&self, fail: bool) {
            *self.should_fail.write().await = fail;
        }

        async fn check_should_fail(&self) -> Result<(), DomainError> {
            if *self.should_fail.read().await {
                return Err(DomainError::storage("Mock repository configured to fail"));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn insert(
            &self,
            username: &str,
            password_hash: &str,
        ) -> Result<UserAccount, DomainError> {
            self.check_should_fail().await?;
            let mut users = self.users.write().await;

            if users.values().any(|u| u.username() == username) {
                return Err(DomainError::conflict("Username already exists"));
            }

            let mut next_id = self.next_id.write().await;
            *next_id += 1;
            let account = UserAccount::new(UserId::new(*next_id), username, password_hash);
            users.insert(*next_id, account.clone());
            Ok(account)
        }

        async fn find(&self, id: UserId) -> Result<Option<UserAccount>, DomainError> {
            self.check_should_fail().await?;
            let users = self.users.read().await;
            Ok(users.get(&id.as_i64()).cloned())
        }

        async fn find_by_username(
            &self,
            username: &str,
        ) -> Result<Option<UserAccount>, DomainError> {
            self.check_should_fail().await?;
            let users = self.users.read().await;
            Ok(users.values().find(|u| u.username() == username).cloned())
        }

        async fn list(&self) -> Result<Vec<UserSummary>, DomainError> {
            self.check_should_fail().await?;
            let users = self.users.read().await;
            Ok(users.values().map(UserSummary::from).collect())
        }

        async fn update_credentials(
            &self,
            id: UserId,
            username: &str,
            password_hash: &str,
        ) -> Result<bool, DomainError> {
            self.check_should_fail().await?;
            let mut users = self.users.write().await;

            let taken = users
                .values()
                .any(|u| u.username() == username && u.id() != id);
            if taken {
                return Err(DomainError::conflict("Username already exists"));
            }

            match users.get_mut(&id.as_i64()) {
                Some(account) => {
                    account.set_username(username);
                    account.set_password_hash(password_hash);
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
            self.check_should_fail().await?;
            let mut users = self.users.write().await;
            Ok(users.remove(&id.as_i64()).is_some())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_insert_assigns_sequential_ids() {
            let repo = MockUserRepository::new();

            let first = repo.insert("alice", "hash-a").await.unwrap();
            let second = repo.insert("bob", "hash-b").await.unwrap();

            assert_eq!(first.id(), UserId::new(1));
            assert_eq!(second.id(), UserId::new(2));
        }

        #[tokio::test]
        async fn test_find_by_username() {
            let repo = MockUserRepository::new();
            let created = repo.insert("alice", "hash").await.unwrap();

            let found = repo.find_by_username("alice").await.unwrap().unwrap();
            assert_eq!(found.id(), created.id());

            assert!(repo.find_by_username("nobody").await.unwrap().is_none());
        }

        #[tokio::test]
        async fn test_insert_duplicate_username_conflicts() {
            let repo = MockUserRepository::new();
            repo.insert("alice", "hash").await.unwrap();

            let result = repo.insert("alice", "other-hash").await;
            assert!(matches!(result, Err(DomainError::Conflict { .. })));
        }

        #[tokio::test]
        async fn test_username_exists_default_method() {
            let repo = MockUserRepository::new();
            repo.insert("alice", "hash").await.unwrap();

            assert!(repo.username_exists("alice").await.unwrap());
            assert!(!repo.username_exists("bob").await.unwrap());
        }

        #[tokio::test]
        async fn test_update_credentials_missing_row_reports_false() {
            let repo = MockUserRepository::new();

            let updated = repo
                .update_credentials(UserId::new(99), "ghost", "hash")
                .await
                .unwrap();
            assert!(!updated);
        }

        #[tokio::test]
        async fn test_update_credentials_overwrites_both_fields() {
            let repo = MockUserRepository::new();
            let created = repo.insert("alice", "old-hash").await.unwrap();

            let updated = repo
                .update_credentials(created.id(), "alice2", "new-hash")
                .await
                .unwrap();
            assert!(updated);

            let account = repo.find(created.id()).await.unwrap().unwrap();
            assert_eq!(account.username(), "alice2");
            assert_eq!(account.password_hash(), "new-hash");
        }

        #[tokio::test]
        async fn test_delete_reports_presence() {
            let repo = MockUserRepository::new();
            let created = repo.insert("alice", "hash").await.unwrap();

            assert!(repo.delete(created.id()).await.unwrap());
            assert!(!repo.delete(created.id()).await.unwrap());
        }

        #[tokio::test]
        async fn test_list_is_ordered_by_id() {
            let repo = MockUserRepository::new();
            repo.insert("carol", "h1").await.unwrap();
            repo.insert("alice", "h2").await.unwrap();
            repo.insert("bob", "h3").await.unwrap();

            let listed = repo.list().await.unwrap();
            let ids: Vec<i64> = listed.iter().map(|u| u.id.as_i64()).collect();
            assert_eq!(ids, vec![1, 2, 3]);
        }

        #[tokio::test]
        async fn test_failure_toggle() {
            let repo = MockUserRepository::new();
            repo.set_should_fail(true).await;

            let result = repo.list().await;
            assert!(matches!(result, Err(DomainError::Storage { .. })));
        }
    }
}
