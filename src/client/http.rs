//! Typed HTTP client for the user directory API

use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;

use crate::api::types::ApiErrorResponse;
use crate::domain::{UserId, UserSummary};

/// Errors surfaced by the directory client
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with an error status
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    /// The request never produced a response
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Public view of a newly registered account
#[derive(Debug, Clone, Deserialize)]
pub struct RegisteredUser {
    pub id: UserId,
    pub username: String,
}

/// Access/refresh token pair returned by login
#[derive(Debug, Clone, Deserialize)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct ProtectedResponse {
    logged_in_as: String,
}

/// Client for the directory server's HTTP API.
///
/// Error statuses are decoded from the server's JSON error body when
/// present, so callers see the server's own message.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    base_url: String,
    http: Client,
}

impl DirectoryClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// POST /register
    pub async fn register(
        &self,
        username: &str,
        password: &str,
    ) -> Result<RegisteredUser, ClientError> {
        let response = self
            .http
            .post(self.url("/register"))
            .json(&json!({"username": username, "password": password}))
            .send()
            .await?;

        Self::decode(response).await
    }

    /// POST /login
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<SessionTokens, ClientError> {
        let response = self
            .http
            .post(self.url("/login"))
            .json(&json!({"username": username, "password": password}))
            .send()
            .await?;

        Self::decode(response).await
    }

    /// POST /refresh, presenting the refresh token as a bearer token
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, ClientError> {
        let response = self
            .http
            .post(self.url("/refresh"))
            .bearer_auth(refresh_token)
            .send()
            .await?;

        let body: AccessTokenResponse = Self::decode(response).await?;
        Ok(body.access_token)
    }

    /// GET /protected, reporting the username bound to the access token
    pub async fn whoami(&self, access_token: &str) -> Result<String, ClientError> {
        let response = self
            .http
            .get(self.url("/protected"))
            .bearer_auth(access_token)
            .send()
            .await?;

        let body: ProtectedResponse = Self::decode(response).await?;
        Ok(body.logged_in_as)
    }

    /// GET /users
    pub async fn list_users(&self) -> Result<Vec<UserSummary>, ClientError> {
        let response = self.http.get(self.url("/users")).send().await?;

        Self::decode(response).await
    }

    /// PUT /users/{id}
    pub async fn update_user(
        &self,
        id: UserId,
        username: &str,
        password: &str,
    ) -> Result<(), ClientError> {
        let response = self
            .http
            .put(self.url(&format!("/users/{id}")))
            .json(&json!({"username": username, "password": password}))
            .send()
            .await?;

        Self::check(response).await
    }

    /// DELETE /users/{id}
    pub async fn delete_user(&self, id: UserId) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/users/{id}")))
            .send()
            .await?;

        Self::check(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        Ok(response.json::<T>().await?)
    }

    async fn check(response: Response) -> Result<(), ClientError> {
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        Ok(())
    }

    async fn error_from_response(response: Response) -> ClientError {
        let status = response.status();
        let message = match response.json::<ApiErrorResponse>().await {
            Ok(body) => body.error.message,
            // Non-JSON error bodies fall back to the status line
            Err(_) => status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string(),
        };

        ClientError::Api { status, message }
    }
}
