//! # AuthQuest
//!
//! AuthQuest is a credential authentication service: accounts sign up with
//! email and password, verify their email with a 6-digit code, sign in to
//! receive a signed session token, and recover access through an emailed
//! password reset link.
//!
//! The [`Auth`] facade wires the individual services together over a single
//! [`AccountRepository`] and a [`Notifier`]. Storage and email delivery are
//! pluggable; the `sqlite` and `mailer` features provide the default
//! backends.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use authquest::{Auth, AuthConfig, SessionConfig};
//! use authquest::sqlite::SqliteAccountRepository;
//! use authquest_core::services::MailNotifier;
//!
//! #[tokio::main]
//! async fn main() {
//!     let pool = sqlx::SqlitePool::connect("sqlite::memory:").await.unwrap();
//!     authquest::sqlite::migrate(&pool).await.unwrap();
//!
//!     let auth = Auth::new(
//!         Arc::new(SqliteAccountRepository::new(pool)),
//!         Arc::new(MailNotifier::from_env().unwrap()),
//!         AuthConfig::new(b"a long random signing secret".to_vec(), "https://app.example.com"),
//!     );
//!
//!     let (profile, token) = auth
//!         .sign_up("ann@example.com", "Ann", "correct horse battery")
//!         .await
//!         .unwrap();
//!     println!("signed up {} with session {token}", profile.email);
//! }
//! ```

use std::sync::Arc;

use authquest_core::{
    AccountRepository, AccountService, EmailVerificationService, Error, Notifier,
    PasswordResetService, Profile, SessionService, SessionToken,
};

pub use authquest_core::{
    self as core, Account, AccountId, NewAccount, PasswordHash,
    session::SessionConfig,
};

#[cfg(feature = "sqlite")]
pub mod sqlite {
    pub use authquest_storage_sqlite::{SqliteAccountRepository, connect, migrate};
}

#[cfg(feature = "mailer")]
pub use authquest_mailer as mailer;

/// Configuration for an [`Auth`] instance.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session token signing configuration
    pub session: SessionConfig,
    /// Base URL of the frontend, used in emailed reset links
    pub client_url: String,
}

impl AuthConfig {
    pub fn new(secret: impl Into<Vec<u8>>, client_url: impl Into<String>) -> Self {
        Self {
            session: SessionConfig::new(secret),
            client_url: client_url.into(),
        }
    }

    pub fn with_session(mut self, session: SessionConfig) -> Self {
        self.session = session;
        self
    }
}

/// The authentication facade.
///
/// Successful sign-up and sign-in return the account's [`Profile`] together
/// with a fresh [`SessionToken`]; the caller decides how to deliver the token
/// (the HTTP layer puts it in a cookie).
pub struct Auth<R: AccountRepository> {
    accounts: Arc<AccountService<R>>,
    verification: Arc<EmailVerificationService<R>>,
    resets: Arc<PasswordResetService<R>>,
    sessions: Arc<SessionService<R>>,
}

impl<R: AccountRepository> Auth<R> {
    pub fn new(repository: Arc<R>, notifier: Arc<dyn Notifier>, config: AuthConfig) -> Self {
        let accounts = Arc::new(AccountService::new(repository.clone(), notifier.clone()));
        let verification = Arc::new(EmailVerificationService::new(
            repository.clone(),
            notifier.clone(),
        ));
        let resets = Arc::new(PasswordResetService::new(
            repository.clone(),
            notifier,
            config.client_url,
        ));
        let sessions = Arc::new(SessionService::new(repository, config.session));

        Self {
            accounts,
            verification,
            resets,
            sessions,
        }
    }

    /// Register a new account and start a session for it.
    ///
    /// The account begins unverified; a verification code goes out by email.
    pub async fn sign_up(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<(Profile, SessionToken), Error> {
        let account = self.accounts.sign_up(email, name, password).await?;
        let token = self.sessions.issue_token(&account.id)?;
        Ok((account.profile(), token))
    }

    /// Authenticate with email and password, starting a session on success.
    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(Profile, SessionToken), Error> {
        let account = self.accounts.sign_in(email, password).await?;
        let token = self.sessions.issue_token(&account.id)?;
        Ok((account.profile(), token))
    }

    /// Confirm an account's email with the emailed 6-digit code.
    pub async fn verify_email(&self, code: &str) -> Result<Profile, Error> {
        let account = self.verification.verify_email(code).await?;
        Ok(account.profile())
    }

    /// Start a password reset for the given email.
    pub async fn forgot_password(&self, email: &str) -> Result<(), Error> {
        self.resets.request_reset(email).await
    }

    /// Complete a password reset with the token from the emailed link.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<Profile, Error> {
        let account = self.resets.reset_password(token, new_password).await?;
        Ok(account.profile())
    }

    /// Resolve a session token to the profile it belongs to.
    pub async fn check_session(&self, token: &SessionToken) -> Result<Profile, Error> {
        let account = self.sessions.authenticate(token).await?;
        Ok(account.profile())
    }
}
