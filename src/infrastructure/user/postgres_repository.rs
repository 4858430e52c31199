//! PostgreSQL user repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::DomainError;
use crate::domain::user::{UserAccount, UserId, UserRepository, UserSummary};

/// PostgreSQL implementation of UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the users table if it does not exist yet.
    ///
    /// Existing data is left untouched.
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id            BIGSERIAL PRIMARY KEY,
                username      VARCHAR(100) UNIQUE NOT NULL,
                password_hash TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create users table: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn insert(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<UserAccount, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, username, "Failed to insert user"))?;

        let id: i64 = row.get("id");
        Ok(UserAccount::new(UserId::new(id), username, password_hash))
    }

    async fn find(&self, id: UserId) -> Result<Option<UserAccount>, DomainError> {
        let row = sqlx::query("SELECT id, username, password_hash FROM users WHERE id = $1")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get user: {}", e)))?;

        Ok(row.map(|row| row_to_account(&row)))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserAccount>, DomainError> {
        let row = sqlx::query("SELECT id, username, password_hash FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get user by username: {}", e)))?;

        Ok(row.map(|row| row_to_account(&row)))
    }

    async fn list(&self) -> Result<Vec<UserSummary>, DomainError> {
        let rows = sqlx::query("SELECT id, username FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list users: {}", e)))?;

        Ok(rows
            .iter()
            .map(|row| UserSummary {
                id: UserId::new(row.get("id")),
                username: row.get("username"),
            })
            .collect())
    }

    async fn update_credentials(
        &self,
        id: UserId,
        username: &str,
        password_hash: &str,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET username = $2, password_hash = $3
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .bind(username)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, username, "Failed to update user"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete user: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_account(row: &sqlx::postgres::PgRow) -> UserAccount {
    let id: i64 = row.get("id");
    let username: String = row.get("username");
    let password_hash: String = row.get("password_hash");

    UserAccount::new(UserId::new(id), username, password_hash)
}

/// Map a write failure, turning a unique-index violation on the username
/// column into a Conflict.
fn map_write_error(e: sqlx::Error, username: &str, context: &str) -> DomainError {
    let unique_violation = e
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation());

    if unique_violation {
        DomainError::conflict(format!("Username '{}' already exists", username))
    } else {
        DomainError::storage(format!("{}: {}", context, e))
    }
}
