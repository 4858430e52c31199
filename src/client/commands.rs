//! Command handlers for the admin console
//!
//! Each handler performs its HTTP call plus a listing refresh and returns
//! a `CommandOutcome` for the caller to render. Handlers never print;
//! presentation stays with the display layer.

use crate::domain::{UserId, UserSummary};

use super::http::{ClientError, DirectoryClient};

/// Result of one console command: a status line plus the refreshed listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub status: String,
    pub users: Vec<UserSummary>,
}

/// Fetch the current listing without changing anything
pub async fn refresh_list(client: &DirectoryClient) -> Result<CommandOutcome, ClientError> {
    let users = client.list_users().await?;

    Ok(CommandOutcome {
        status: format!("{} user(s) registered", users.len()),
        users,
    })
}

/// Register a new account, then refresh the listing
pub async fn register_user(
    client: &DirectoryClient,
    username: &str,
    password: &str,
) -> Result<CommandOutcome, ClientError> {
    let created = client.register(username, password).await?;
    let users = client.list_users().await?;

    Ok(CommandOutcome {
        status: format!("Registered '{}' with id {}", created.username, created.id),
        users,
    })
}

/// Delete an account, then refresh the listing
pub async fn delete_user(
    client: &DirectoryClient,
    id: UserId,
    username: &str,
) -> Result<CommandOutcome, ClientError> {
    client.delete_user(id).await?;
    let users = client.list_users().await?;

    Ok(CommandOutcome {
        status: format!("Deleted '{username}'"),
        users,
    })
}

/// Overwrite an account's username and password, then refresh the listing
pub async fn change_credentials(
    client: &DirectoryClient,
    id: UserId,
    username: &str,
    password: &str,
) -> Result<CommandOutcome, ClientError> {
    client.update_user(id, username, password).await?;
    let users = client.list_users().await?;

    Ok(CommandOutcome {
        status: format!("Updated user {id} to '{username}'"),
        users,
    })
}

/// Render a client error as a one-line alert
pub fn describe_error(error: &ClientError) -> String {
    match error {
        ClientError::Api { status, message } => format!("HTTP {}: {message}", status.as_u16()),
        ClientError::Transport(e) => format!("Server unreachable: {e}"),
    }
}
