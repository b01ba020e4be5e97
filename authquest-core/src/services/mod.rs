//! Service layer for business logic
//!
//! This module contains concrete service implementations that encapsulate
//! account, verification, reset and session logic.

pub mod account;
pub mod email_verification;
pub mod notifier;
pub mod password_reset;
pub mod session;

pub use account::AccountService;
pub use email_verification::EmailVerificationService;
pub use notifier::Notifier;
pub use password_reset::PasswordResetService;
pub use session::SessionService;

#[cfg(feature = "mailer")]
pub use notifier::MailNotifier;

#[cfg(test)]
pub(crate) mod test_support {
    use std::{collections::HashMap, sync::Arc};

    use async_trait::async_trait;
    use chrono::Utc;
    use tokio::sync::Mutex;

    use crate::{
        Error,
        account::{Account, AccountId, NewAccount},
        repository::AccountRepository,
        services::Notifier,
    };

    #[derive(Default)]
    pub struct MockAccountRepository {
        pub accounts: Arc<Mutex<HashMap<AccountId, Account>>>,
    }

    #[async_trait]
    impl AccountRepository for MockAccountRepository {
        async fn create(&self, new_account: NewAccount) -> Result<Account, Error> {
            let mut accounts = self.accounts.lock().await;
            if accounts.values().any(|a| a.email == new_account.email) {
                return Err(Error::Conflict);
            }
            let account = Account {
                id: new_account.id,
                email: new_account.email,
                name: new_account.name,
                password_hash: new_account.password_hash,
                is_verified: false,
                verification_code: Some(new_account.verification_code),
                verification_expires_at: Some(new_account.verification_expires_at),
                reset_token: None,
                reset_expires_at: None,
                last_login_at: None,
                created_at: Utc::now(),
            };
            accounts.insert(account.id.clone(), account.clone());
            Ok(account)
        }

        async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, Error> {
            Ok(self.accounts.lock().await.get(id).cloned())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<Account>, Error> {
            Ok(self
                .accounts
                .lock()
                .await
                .values()
                .find(|a| a.email == email)
                .cloned())
        }

        async fn find_by_verification_code(&self, code: &str) -> Result<Option<Account>, Error> {
            Ok(self
                .accounts
                .lock()
                .await
                .values()
                .find(|a| a.verification_code.as_deref() == Some(code))
                .cloned())
        }

        async fn find_by_reset_token(&self, token: &str) -> Result<Option<Account>, Error> {
            Ok(self
                .accounts
                .lock()
                .await
                .values()
                .find(|a| a.reset_token.as_deref() == Some(token))
                .cloned())
        }

        async fn update(&self, account: &Account) -> Result<Account, Error> {
            let mut accounts = self.accounts.lock().await;
            accounts.insert(account.id.clone(), account.clone());
            Ok(account.clone())
        }
    }

    /// Records every notification instead of sending anything.
    #[derive(Default)]
    pub struct RecordingNotifier {
        pub sent: Arc<Mutex<Vec<SentNotification>>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum SentNotification {
        Verification { to: String, code: String },
        Welcome { to: String },
        Reset { to: String, reset_url: String },
        ResetSuccess { to: String },
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send_verification_email(
            &self,
            to: &str,
            _name: &str,
            code: &str,
        ) -> Result<(), Error> {
            self.sent.lock().await.push(SentNotification::Verification {
                to: to.to_string(),
                code: code.to_string(),
            });
            Ok(())
        }

        async fn send_welcome_email(&self, to: &str, _name: &str) -> Result<(), Error> {
            self.sent
                .lock()
                .await
                .push(SentNotification::Welcome { to: to.to_string() });
            Ok(())
        }

        async fn send_reset_email(
            &self,
            to: &str,
            _name: &str,
            reset_url: &str,
        ) -> Result<(), Error> {
            self.sent.lock().await.push(SentNotification::Reset {
                to: to.to_string(),
                reset_url: reset_url.to_string(),
            });
            Ok(())
        }

        async fn send_reset_success_email(&self, to: &str, _name: &str) -> Result<(), Error> {
            self.sent
                .lock()
                .await
                .push(SentNotification::ResetSuccess { to: to.to_string() });
            Ok(())
        }
    }

    /// A notifier whose sends always fail, for exercising dispatch errors.
    pub struct FailingNotifier;

    #[async_trait]
    impl Notifier for FailingNotifier {
        async fn send_verification_email(
            &self,
            _to: &str,
            _name: &str,
            _code: &str,
        ) -> Result<(), Error> {
            Err(Error::Dispatch("smtp connection refused".to_string()))
        }

        async fn send_welcome_email(&self, _to: &str, _name: &str) -> Result<(), Error> {
            Err(Error::Dispatch("smtp connection refused".to_string()))
        }

        async fn send_reset_email(
            &self,
            _to: &str,
            _name: &str,
            _reset_url: &str,
        ) -> Result<(), Error> {
            Err(Error::Dispatch("smtp connection refused".to_string()))
        }

        async fn send_reset_success_email(&self, _to: &str, _name: &str) -> Result<(), Error> {
            Err(Error::Dispatch("smtp connection refused".to_string()))
        }
    }
}
