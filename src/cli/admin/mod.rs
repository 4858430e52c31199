//! Admin command - interactive console against a running directory server
//!
//! A select-menu loop over the directory operations. Command handlers live
//! in `client::commands` and return a `CommandOutcome`; this module only
//! prompts and renders. Errors are shown as alerts and the loop keeps
//! running, so a flaky server does not kill the session.

use anyhow::Result;
use clap::Args;
use dialoguer::console::{Term, style};
use dialoguer::{Confirm, Input, Password, Select};
use tokio::runtime::Handle;

use crate::client::{CommandOutcome, DirectoryClient, commands, describe_error};
use crate::domain::UserSummary;

#[derive(Args, Clone)]
pub struct AdminArgs {
    /// Base URL of the directory server
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    pub server_url: String,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    RefreshList,
    RegisterUser,
    DeleteUser,
    ChangeCredentials,
    Quit,
}

const MENU: [MenuItem; 5] = [
    MenuItem::RefreshList,
    MenuItem::RegisterUser,
    MenuItem::DeleteUser,
    MenuItem::ChangeCredentials,
    MenuItem::Quit,
];

fn menu_label(item: MenuItem) -> &'static str {
    match item {
        MenuItem::RefreshList => "Refresh list",
        MenuItem::RegisterUser => "Register user",
        MenuItem::DeleteUser => "Delete user",
        MenuItem::ChangeCredentials => "Change credentials",
        MenuItem::Quit => "Quit",
    }
}

/// Run the admin console.
///
/// The dialoguer prompts block, so the whole loop runs on a blocking
/// thread and drives the HTTP client through the runtime handle.
pub async fn run(args: AdminArgs) -> Result<()> {
    let handle = Handle::current();

    tokio::task::spawn_blocking(move || run_console(handle, args)).await?
}

fn run_console(handle: Handle, args: AdminArgs) -> Result<()> {
    let term = Term::stderr();
    let client = DirectoryClient::new(&args.server_url);

    term.write_line(&format!("Connected to {}", args.server_url))?;

    // Initial listing; a dead server shows an alert, not a crash
    let mut view = match handle.block_on(commands::refresh_list(&client)) {
        Ok(outcome) => outcome,
        Err(e) => {
            alert(&term, &describe_error(&e))?;
            CommandOutcome {
                status: "No listing yet".to_string(),
                users: Vec::new(),
            }
        }
    };
    render(&term, &view)?;

    loop {
        let labels: Vec<&str> = MENU.iter().map(|item| menu_label(*item)).collect();
        let choice = Select::new()
            .with_prompt("roster admin")
            .items(&labels)
            .default(0)
            .interact_on(&term)?;

        let outcome = match MENU[choice] {
            MenuItem::Quit => break,
            MenuItem::RefreshList => handle.block_on(commands::refresh_list(&client)),
            MenuItem::RegisterUser => {
                let username: String = Input::new()
                    .with_prompt("Username")
                    .interact_text_on(&term)?;
                let password = Password::new()
                    .with_prompt("Password")
                    .interact_on(&term)?;

                handle.block_on(commands::register_user(&client, &username, &password))
            }
            MenuItem::DeleteUser => {
                let Some(user) = select_user(&term, &view.users)? else {
                    continue;
                };
                let confirmed = Confirm::new()
                    .with_prompt(format!("Delete '{}'?", user.username))
                    .default(false)
                    .interact_on(&term)?;
                if !confirmed {
                    continue;
                }

                handle.block_on(commands::delete_user(&client, user.id, &user.username))
            }
            MenuItem::ChangeCredentials => {
                let Some(user) = select_user(&term, &view.users)? else {
                    continue;
                };
                let username: String = Input::new()
                    .with_prompt("New username")
                    .default(user.username.clone())
                    .interact_text_on(&term)?;
                let password = Password::new()
                    .with_prompt("New password")
                    .interact_on(&term)?;

                handle.block_on(commands::change_credentials(
                    &client, user.id, &username, &password,
                ))
            }
        };

        match outcome {
            Ok(next) => {
                view = next;
                render(&term, &view)?;
            }
            Err(e) => alert(&term, &describe_error(&e))?,
        }
    }

    Ok(())
}

/// Pick a user from the current listing, or None when there is nothing
/// to pick from
fn select_user(term: &Term, users: &[UserSummary]) -> Result<Option<UserSummary>> {
    if users.is_empty() {
        term.write_line("No users in the current listing; refresh first")?;
        return Ok(None);
    }

    let labels: Vec<String> = users
        .iter()
        .map(|user| format!("{}  (id {})", user.username, user.id))
        .collect();
    let choice = Select::new()
        .with_prompt("Select user")
        .items(&labels)
        .default(0)
        .interact_on(term)?;

    Ok(Some(users[choice].clone()))
}

fn render(term: &Term, view: &CommandOutcome) -> Result<()> {
    term.write_line(&format!("{}", style(&view.status).green()))?;

    if view.users.is_empty() {
        term.write_line("  (no users)")?;
    } else {
        for user in &view.users {
            term.write_line(&format!("  {:>6}  {}", user.id, user.username))?;
        }
    }

    Ok(())
}

fn alert(term: &Term, message: &str) -> Result<()> {
    term.write_line(&format!("{}", style(message).red()))?;
    Ok(())
}
