use std::sync::Arc;

use chrono::Utc;

use crate::{
    Error,
    account::{Account, AccountId, NewAccount},
    crypto,
    repository::AccountRepository,
    services::{Notifier, notifier},
    token,
    validation::{validate_email, validate_name, validate_password},
};

/// Service for account creation and credential sign-in
pub struct AccountService<R: AccountRepository> {
    repository: Arc<R>,
    notifier: Arc<dyn Notifier>,
}

impl<R: AccountRepository> AccountService<R> {
    pub fn new(repository: Arc<R>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    /// Register a new account with the given credentials
    ///
    /// The account starts unverified, with a 6-digit verification code that
    /// is persisted first and emailed after. A dispatch failure surfaces as
    /// an error, but the account is already created by then, so a retry of
    /// the same email reports a conflict.
    pub async fn sign_up(&self, email: &str, name: &str, password: &str) -> Result<Account, Error> {
        validate_email(email)?;
        validate_name(name)?;
        validate_password(password)?;

        if self.repository.find_by_email(email).await?.is_some() {
            return Err(Error::Conflict);
        }

        let password_hash = crypto::hash_password(password).await?;
        let verification_code = token::generate_verification_code();

        let new_account = NewAccount::builder()
            .email(email)
            .name(name)
            .password_hash(password_hash)
            .verification_code(verification_code.clone())
            .verification_expires_at(Utc::now() + token::VERIFICATION_CODE_TTL)
            .build()?;

        let account = self.repository.create(new_account).await?;

        tracing::info!(
            account.id = %account.id,
            account.email = %account.email,
            "Created account"
        );

        notifier::dispatch(self.notifier.send_verification_email(
            &account.email,
            &account.name,
            &verification_code,
        ))
        .await?;

        Ok(account)
    }

    /// Authenticate with email and password
    ///
    /// Wrong email and wrong password both map to [`Error::InvalidCredentials`]
    /// so the response never reveals which half was wrong.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Account, Error> {
        if email.is_empty() || password.is_empty() {
            return Err(Error::InvalidCredentials);
        }

        let mut account = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or(Error::InvalidCredentials)?;

        if !crypto::verify_password(&account.password_hash, password).await? {
            return Err(Error::InvalidCredentials);
        }

        account.last_login_at = Some(Utc::now());
        let account = self.repository.update(&account).await?;

        tracing::info!(account.id = %account.id, "Account signed in");

        Ok(account)
    }

    /// Fetch an account by ID
    pub async fn get_account(&self, id: &AccountId) -> Result<Option<Account>, Error> {
        self.repository.find_by_id(id).await
    }
}
