//! CLI module for the roster directory service
//!
//! Provides subcommands for the two faces of the tool:
//! - `serve`: run the HTTP directory server
//! - `admin`: interactive console against a running server

pub mod admin;
pub mod serve;

use clap::{Parser, Subcommand};

/// Roster - user directory service with an interactive admin console
#[derive(Parser)]
#[command(name = "roster")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the directory API server
    Serve,

    /// Open the interactive admin console
    Admin(admin::AdminArgs),
}
