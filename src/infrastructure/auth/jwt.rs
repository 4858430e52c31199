//! JWT issuance and verification for access and refresh tokens

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::DomainError;

/// The two roles a token can have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Short-lived credential authorizing API calls
    Access,
    /// Longer-lived credential used solely to mint new access tokens
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
        }
    }
}

/// Claims carried by every issued token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject - the username the token is bound to
    pub sub: String,
    /// Token role; a refresh token is never accepted where an access
    /// token is required, and vice versa
    #[serde(rename = "type")]
    pub kind: TokenKind,
    /// Issued at timestamp (Unix epoch)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
}

impl TokenClaims {
    fn new(username: &str, kind: TokenKind, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: username.to_string(),
            kind,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// The identity the token is bound to
    pub fn username(&self) -> &str {
        &self.sub
    }
}

/// A freshly issued access/refresh pair
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Configuration for token issuance
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Secret key for HS256 signing
    pub secret: String,
    /// Access token lifetime in seconds
    pub access_ttl_secs: u64,
    /// Refresh token lifetime in seconds
    pub refresh_ttl_secs: u64,
}

impl TokenConfig {
    pub fn new(secret: impl Into<String>, access_ttl_secs: u64, refresh_ttl_secs: u64) -> Self {
        Self {
            secret: secret.into(),
            access_ttl_secs,
            refresh_ttl_secs,
        }
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            // 15 minutes / 30 days
            access_ttl_secs: 900,
            refresh_ttl_secs: 2_592_000,
        }
    }
}

/// Trait for token issuance and verification
pub trait TokenIssuer: Send + Sync + Debug {
    /// Issue an access/refresh pair bound to a username
    fn issue_pair(&self, username: &str) -> Result<TokenPair, DomainError>;

    /// Issue a single access token bound to a username
    fn issue_access(&self, username: &str) -> Result<String, DomainError>;

    /// Verify a token, requiring it to be of the expected kind
    fn verify(&self, token: &str, expected: TokenKind) -> Result<TokenClaims, DomainError>;
}

/// HS256 token service over a shared secret
#[derive(Clone)]
pub struct JwtService {
    config: TokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_ttl_secs", &self.config.access_ttl_secs)
            .field("refresh_ttl_secs", &self.config.refresh_ttl_secs)
            .field("keys", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    /// Create a new token service with the given configuration
    pub fn new(config: TokenConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Create a token service with default configuration
    pub fn with_default_config() -> Self {
        Self::new(TokenConfig::default())
    }

    fn issue(&self, username: &str, kind: TokenKind) -> Result<String, DomainError> {
        let ttl_secs = match kind {
            TokenKind::Access => self.config.access_ttl_secs,
            TokenKind::Refresh => self.config.refresh_ttl_secs,
        };
        let claims = TokenClaims::new(username, kind, Duration::seconds(ttl_secs as i64));

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to sign token: {}", e)))
    }
}

impl TokenIssuer for JwtService {
    fn issue_pair(&self, username: &str) -> Result<TokenPair, DomainError> {
        Ok(TokenPair {
            access_token: self.issue(username, TokenKind::Access)?,
            refresh_token: self.issue(username, TokenKind::Refresh)?,
        })
    }

    fn issue_access(&self, username: &str) -> Result<String, DomainError> {
        self.issue(username, TokenKind::Access)
    }

    fn verify(&self, token: &str, expected: TokenKind) -> Result<TokenClaims, DomainError> {
        // Validation::default() is HS256 with expiry checking
        let token_data = decode::<TokenClaims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| DomainError::unauthorized(format!("Invalid token: {}", e)))?;

        let claims = token_data.claims;

        if claims.kind != expected {
            return Err(DomainError::unauthorized(format!(
                "Expected {} token, got {} token",
                expected.as_str(),
                claims.kind.as_str()
            )));
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_service() -> JwtService {
        JwtService::new(TokenConfig::new("test-secret-key-12345", 900, 2_592_000))
    }

    #[test]
    fn test_issue_pair_and_verify() {
        let service = create_service();

        let pair = service.issue_pair("alice").unwrap();
        assert!(!pair.access_token.is_empty());
        assert!(!pair.refresh_token.is_empty());
        assert_ne!(pair.access_token, pair.refresh_token);

        let access = service.verify(&pair.access_token, TokenKind::Access).unwrap();
        assert_eq!(access.username(), "alice");
        assert_eq!(access.kind, TokenKind::Access);

        let refresh = service
            .verify(&pair.refresh_token, TokenKind::Refresh)
            .unwrap();
        assert_eq!(refresh.username(), "alice");
        assert_eq!(refresh.kind, TokenKind::Refresh);
    }

    #[test]
    fn test_kind_mismatch_is_rejected() {
        let service = create_service();
        let pair = service.issue_pair("alice").unwrap();

        let result = service.verify(&pair.access_token, TokenKind::Refresh);
        assert!(matches!(result, Err(DomainError::Unauthorized { .. })));

        let result = service.verify(&pair.refresh_token, TokenKind::Access);
        assert!(matches!(result, Err(DomainError::Unauthorized { .. })));
    }

    #[test]
    fn test_malformed_token_is_rejected() {
        let service = create_service();

        let result = service.verify("not-a-token", TokenKind::Access);
        assert!(matches!(result, Err(DomainError::Unauthorized { .. })));
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let service = create_service();
        let pair = service.issue_pair("alice").unwrap();

        // Flip a character in the signature segment
        let mut tampered = pair.access_token;
        let replacement = if tampered.ends_with('A') { "B" } else { "A" };
        tampered.replace_range(tampered.len() - 1.., replacement);

        let result = service.verify(&tampered, TokenKind::Access);
        assert!(matches!(result, Err(DomainError::Unauthorized { .. })));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let issuing = JwtService::new(TokenConfig::new("secret-1", 900, 2_592_000));
        let verifying = JwtService::new(TokenConfig::new("secret-2", 900, 2_592_000));

        let pair = issuing.issue_pair("alice").unwrap();

        let result = verifying.verify(&pair.refresh_token, TokenKind::Refresh);
        assert!(matches!(result, Err(DomainError::Unauthorized { .. })));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = create_service();

        // Craft a refresh token that expired two hours ago, comfortably past
        // the verifier's clock-skew leeway
        let past = Utc::now() - Duration::hours(2);
        let claims = TokenClaims {
            sub: "alice".to_string(),
            kind: TokenKind::Refresh,
            iat: (past - Duration::hours(1)).timestamp(),
            exp: past.timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret-key-12345"),
        )
        .unwrap();

        let result = service.verify(&token, TokenKind::Refresh);
        assert!(matches!(result, Err(DomainError::Unauthorized { .. })));
    }

    #[test]
    fn test_claims_serialize_kind_as_type_field() {
        let claims = TokenClaims::new("alice", TokenKind::Access, Duration::seconds(900));

        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["sub"], "alice");
        assert_eq!(json["type"], "access");
    }

    #[test]
    fn test_default_config() {
        let config = TokenConfig::default();

        assert_eq!(config.access_ttl_secs, 900);
        assert_eq!(config.refresh_ttl_secs, 2_592_000);
    }
}
