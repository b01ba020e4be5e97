use std::sync::Arc;

use chrono::Utc;

use crate::{
    Error,
    account::Account,
    crypto::constant_time_compare,
    repository::AccountRepository,
    services::{Notifier, notifier},
};

/// Service for confirming a freshly signed up account's email address
pub struct EmailVerificationService<R: AccountRepository> {
    repository: Arc<R>,
    notifier: Arc<dyn Notifier>,
}

impl<R: AccountRepository> EmailVerificationService<R> {
    pub fn new(repository: Arc<R>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    /// Verify an account with the 6-digit code from the verification email
    ///
    /// Unknown, already-used and expired codes all map to the same error so
    /// the caller learns nothing about which it was. On success the pending
    /// code is cleared and the account marked verified for good.
    pub async fn verify_email(&self, code: &str) -> Result<Account, Error> {
        if code.is_empty() {
            return Err(Error::InvalidOrExpiredToken);
        }

        let mut account = self
            .repository
            .find_by_verification_code(code)
            .await?
            .ok_or(Error::InvalidOrExpiredToken)?;

        // Lookups may match more loosely than byte equality, so re-check the
        // exact code before trusting it.
        let stored = account
            .verification_code
            .as_deref()
            .ok_or(Error::InvalidOrExpiredToken)?;
        if !constant_time_compare(stored.as_bytes(), code.as_bytes()) {
            return Err(Error::InvalidOrExpiredToken);
        }

        let expires_at = account
            .verification_expires_at
            .ok_or(Error::InvalidOrExpiredToken)?;
        if Utc::now() >= expires_at {
            return Err(Error::InvalidOrExpiredToken);
        }

        account.is_verified = true;
        account.verification_code = None;
        account.verification_expires_at = None;
        let account = self.repository.update(&account).await?;

        tracing::info!(account.id = %account.id, "Verified account email");

        notifier::dispatch(
            self.notifier
                .send_welcome_email(&account.email, &account.name),
        )
        .await?;

        Ok(account)
    }
}
