//! Authentication infrastructure module
//!
//! This module provides JWT access/refresh token management.

mod jwt;

pub use jwt::{JwtService, TokenClaims, TokenConfig, TokenIssuer, TokenKind, TokenPair};
