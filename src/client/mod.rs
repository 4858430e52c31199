//! HTTP client for the directory API and the admin console's command layer

pub mod commands;
pub mod http;

pub use commands::{CommandOutcome, describe_error};
pub use http::{ClientError, DirectoryClient, RegisteredUser, SessionTokens};
