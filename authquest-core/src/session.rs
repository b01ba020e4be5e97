//! Stateless JWT sessions
//!
//! Sessions are self-contained HS256 tokens. Issuing one never touches
//! storage, and verifying one only checks the signature and expiry, so a
//! token stays valid until it expires even if the account changes.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

use crate::{account::AccountId, error::SessionError};

/// Configuration for issuing and verifying session tokens.
#[derive(Clone)]
pub struct SessionConfig {
    /// HS256 signing secret. Rotating it invalidates all outstanding tokens.
    pub secret: Vec<u8>,
    /// Lifetime of a freshly issued token.
    pub ttl: Duration,
}

impl SessionConfig {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
            ttl: Duration::days(7),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("secret", &"***")
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// Claims carried inside a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Account ID the session belongs to
    pub sub: String,
    /// Issued-at time (seconds since epoch)
    pub iat: i64,
    /// Expiration time (seconds since epoch)
    pub exp: i64,
}

/// A signed session token as it travels in the cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Sign a new token for the given account.
    pub fn issue(account_id: &AccountId, config: &SessionConfig) -> Result<Self, SessionError> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: account_id.as_str().to_string(),
            iat: now.timestamp(),
            exp: (now + config.ttl).timestamp(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&config.secret),
        )
        .map_err(|e| SessionError::InvalidToken(e.to_string()))?;

        Ok(Self(token))
    }

    /// Verify the signature and expiry, returning the claims on success.
    pub fn verify(&self, config: &SessionConfig) -> Result<SessionClaims, SessionError> {
        let validation = Validation::new(Algorithm::HS256);

        let data = decode::<SessionClaims>(
            &self.0,
            &DecodingKey::from_secret(&config.secret),
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => SessionError::Expired,
            _ => SessionError::InvalidToken(e.to_string()),
        })?;

        Ok(data.claims)
    }
}

impl std::fmt::Display for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
