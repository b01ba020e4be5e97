//! The account entity and its lifecycle state
//!
//! An account moves through two independent sub-states: a verification state
//! (unverified until the emailed code is confirmed, then verified for good)
//! and a reset state (no pending reset, or a pending reset token with an
//! expiry). The invariant in both cases is that the token and its expiry are
//! either both present or both absent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    error::ValidationError,
    id::{generate_prefixed_id, validate_prefixed_id},
};

/// A unique, stable identifier for a specific account
///
/// This value should be treated as opaque by callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: &str) -> Self {
        AccountId(id.to_string())
    }

    pub fn new_random() -> Self {
        AccountId(generate_prefixed_id("acct"))
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate that this ID has the correct format for an account ID
    pub fn is_valid(&self) -> bool {
        validate_prefixed_id(&self.0, "acct")
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new_random()
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored bcrypt password hash.
///
/// The wrapper keeps the hash out of `Debug` output so it can never end up
/// in logs by accident.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordHash(***)")
    }
}

/// The central account entity.
///
/// | Field                      | Type                       | Description                                   |
/// | -------------------------- | -------------------------- | --------------------------------------------- |
/// | `id`                       | `AccountId`                | Opaque unique identifier, immutable.          |
/// | `email`                    | `String`                   | Unique across accounts, matched exactly.      |
/// | `name`                     | `String`                   | Display name.                                 |
/// | `password_hash`            | `PasswordHash`             | Derived credential, never serialized.         |
/// | `is_verified`              | `bool`                     | Starts false, set once by email verification. |
/// | `verification_code`        | `Option<String>`           | Present only while verification is pending.   |
/// | `verification_expires_at`  | `Option<DateTime<Utc>>`    | Paired with `verification_code`.              |
/// | `reset_token`              | `Option<String>`           | Present only while a reset is pending.        |
/// | `reset_expires_at`         | `Option<DateTime<Utc>>`    | Paired with `reset_token`.                    |
/// | `last_login_at`            | `Option<DateTime<Utc>>`    | Updated on every successful sign-in.          |
/// | `created_at`               | `DateTime<Utc>`            | Set once at creation.                         |
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub email: String,
    pub name: String,
    pub password_hash: PasswordHash,
    pub is_verified: bool,
    pub verification_code: Option<String>,
    pub verification_expires_at: Option<DateTime<Utc>>,
    pub reset_token: Option<String>,
    pub reset_expires_at: Option<DateTime<Utc>>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn has_pending_verification(&self) -> bool {
        self.verification_code.is_some() && self.verification_expires_at.is_some()
    }

    pub fn has_pending_reset(&self) -> bool {
        self.reset_token.is_some() && self.reset_expires_at.is_some()
    }

    /// The client-facing projection of the account, without the credential
    /// hash or any pending token material.
    pub fn profile(&self) -> Profile {
        Profile {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            is_verified: self.is_verified,
            last_login_at: self.last_login_at,
            created_at: self.created_at,
        }
    }
}

/// What the client sees as the `user` object in responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: AccountId,
    pub email: String,
    pub name: String,
    pub is_verified: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a new account.
///
/// A fresh account always starts unverified with a pending verification code.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub id: AccountId,
    pub email: String,
    pub name: String,
    pub password_hash: PasswordHash,
    pub verification_code: String,
    pub verification_expires_at: DateTime<Utc>,
}

impl NewAccount {
    pub fn builder() -> NewAccountBuilder {
        NewAccountBuilder::default()
    }
}

#[derive(Default)]
pub struct NewAccountBuilder {
    id: Option<AccountId>,
    email: Option<String>,
    name: Option<String>,
    password_hash: Option<PasswordHash>,
    verification_code: Option<String>,
    verification_expires_at: Option<DateTime<Utc>>,
}

impl NewAccountBuilder {
    pub fn id(mut self, id: AccountId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn password_hash(mut self, hash: PasswordHash) -> Self {
        self.password_hash = Some(hash);
        self
    }

    pub fn verification_code(mut self, code: impl Into<String>) -> Self {
        self.verification_code = Some(code.into());
        self
    }

    pub fn verification_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.verification_expires_at = Some(expires_at);
        self
    }

    pub fn build(self) -> Result<NewAccount, Error> {
        Ok(NewAccount {
            id: self.id.unwrap_or_default(),
            email: self
                .email
                .ok_or(ValidationError::MissingField("email"))?,
            name: self.name.ok_or(ValidationError::MissingField("name"))?,
            password_hash: self
                .password_hash
                .ok_or(ValidationError::MissingField("password"))?,
            verification_code: self
                .verification_code
                .ok_or(ValidationError::MissingField("verification_code"))?,
            verification_expires_at: self
                .verification_expires_at
                .ok_or(ValidationError::MissingField("verification_expires_at"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_account() -> Account {
        let now = Utc::now();
        Account {
            id: AccountId::new_random(),
            email: "ann@example.com".to_string(),
            name: "Ann".to_string(),
            password_hash: PasswordHash::new("$2b$12$abcdefghijklmnopqrstuv"),
            is_verified: false,
            verification_code: Some("123456".to_string()),
            verification_expires_at: Some(now + Duration::hours(24)),
            reset_token: None,
            reset_expires_at: None,
            last_login_at: None,
            created_at: now,
        }
    }

    #[test]
    fn test_account_id_prefixed() {
        let id = AccountId::new_random();
        assert!(id.as_str().starts_with("acct_"));
        assert!(id.is_valid());

        let id2 = AccountId::new_random();
        assert_ne!(id, id2);

        assert!(!AccountId::new("invalid").is_valid());
    }

    #[test]
    fn test_password_hash_debug_is_redacted() {
        let hash = PasswordHash::new("$2b$12$secret");
        let rendered = format!("{hash:?}");
        assert!(!rendered.contains("secret"));
    }

    #[test]
    fn test_pending_states() {
        let mut account = sample_account();
        assert!(account.has_pending_verification());
        assert!(!account.has_pending_reset());

        account.verification_code = None;
        account.verification_expires_at = None;
        account.reset_token = Some("a".repeat(40));
        account.reset_expires_at = Some(Utc::now() + Duration::hours(1));
        assert!(!account.has_pending_verification());
        assert!(account.has_pending_reset());
    }

    #[test]
    fn test_profile_excludes_credentials() {
        let account = sample_account();
        let profile = account.profile();
        let json = serde_json::to_value(&profile).unwrap();

        assert_eq!(json["email"], "ann@example.com");
        assert_eq!(json["isVerified"], false);
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
        assert!(json.get("verificationCode").is_none());
    }

    #[test]
    fn test_new_account_builder_requires_fields() {
        let result = NewAccount::builder().email("ann@example.com").build();
        assert!(result.is_err());

        let account = NewAccount::builder()
            .email("ann@example.com")
            .name("Ann")
            .password_hash(PasswordHash::new("$2b$12$hash"))
            .verification_code("123456")
            .verification_expires_at(Utc::now() + Duration::hours(24))
            .build()
            .unwrap();
        assert!(account.id.is_valid());
    }
}
