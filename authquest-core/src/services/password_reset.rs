use std::sync::Arc;

use chrono::Utc;

use crate::{
    Error,
    account::Account,
    crypto::{self, constant_time_compare},
    repository::AccountRepository,
    services::{Notifier, notifier},
    token,
    validation::validate_password,
};

/// Service for the forgot-password / reset-password flow
pub struct PasswordResetService<R: AccountRepository> {
    repository: Arc<R>,
    notifier: Arc<dyn Notifier>,
    /// Base URL of the frontend, used to build the emailed reset link
    client_url: String,
}

impl<R: AccountRepository> PasswordResetService<R> {
    pub fn new(repository: Arc<R>, notifier: Arc<dyn Notifier>, client_url: String) -> Self {
        Self {
            repository,
            notifier,
            client_url: client_url.trim_end_matches('/').to_string(),
        }
    }

    /// Start a password reset for the given email
    ///
    /// A fresh token replaces any earlier pending one, so only the most
    /// recent reset link works. Reports [`Error::NotFound`] for an unknown
    /// email rather than answering uniformly.
    pub async fn request_reset(&self, email: &str) -> Result<(), Error> {
        if email.is_empty() {
            return Err(Error::Validation(
                crate::error::ValidationError::MissingField("email"),
            ));
        }

        let mut account = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or(Error::NotFound)?;

        let reset_token = token::generate_reset_token();
        account.reset_token = Some(reset_token.clone());
        account.reset_expires_at = Some(Utc::now() + token::RESET_TOKEN_TTL);
        let account = self.repository.update(&account).await?;

        tracing::info!(account.id = %account.id, "Issued password reset token");

        let reset_url = format!("{}/reset-password/{}", self.client_url, reset_token);
        notifier::dispatch(self.notifier.send_reset_email(
            &account.email,
            &account.name,
            &reset_url,
        ))
        .await?;

        Ok(())
    }

    /// Complete a password reset with the token from the emailed link
    ///
    /// Unknown, already-used and expired tokens all map to the same error.
    /// On success the token is cleared, so the link is single use.
    pub async fn reset_password(
        &self,
        reset_token: &str,
        new_password: &str,
    ) -> Result<Account, Error> {
        validate_password(new_password)?;

        if reset_token.is_empty() {
            return Err(Error::InvalidOrExpiredToken);
        }

        let mut account = self
            .repository
            .find_by_reset_token(reset_token)
            .await?
            .ok_or(Error::InvalidOrExpiredToken)?;

        let stored = account
            .reset_token
            .as_deref()
            .ok_or(Error::InvalidOrExpiredToken)?;
        if !constant_time_compare(stored.as_bytes(), reset_token.as_bytes()) {
            return Err(Error::InvalidOrExpiredToken);
        }

        let expires_at = account
            .reset_expires_at
            .ok_or(Error::InvalidOrExpiredToken)?;
        if Utc::now() >= expires_at {
            return Err(Error::InvalidOrExpiredToken);
        }

        account.password_hash = crypto::hash_password(new_password).await?;
        account.reset_token = None;
        account.reset_expires_at = None;
        let account = self.repository.update(&account).await?;

        tracing::info!(account.id = %account.id, "Reset account password");

        notifier::dispatch(
            self.notifier
                .send_reset_success_email(&account.email, &account.name),
        )
        .await?;

        Ok(account)
    }
}
