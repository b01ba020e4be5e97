//! Outbound notification seam
//!
//! Services talk to a [`Notifier`] rather than a mail transport directly, so
//! the core crate stays testable without SMTP and the mailer crate stays
//! optional.

use std::{future::Future, time::Duration};

use async_trait::async_trait;

use crate::Error;

/// Upper bound on a single notification send. State is already persisted by
/// the time a notification goes out, so a hung transport must not pin the
/// request forever.
pub const DISPATCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Sends account lifecycle notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send the 6-digit verification code to a freshly signed up account
    async fn send_verification_email(&self, to: &str, name: &str, code: &str)
    -> Result<(), Error>;

    /// Welcome the account after its email is verified
    async fn send_welcome_email(&self, to: &str, name: &str) -> Result<(), Error>;

    /// Send a password reset link
    async fn send_reset_email(&self, to: &str, name: &str, reset_url: &str) -> Result<(), Error>;

    /// Confirm that a password reset completed
    async fn send_reset_success_email(&self, to: &str, name: &str) -> Result<(), Error>;
}

/// Run a notification send under [`DISPATCH_TIMEOUT`].
pub(crate) async fn dispatch<F>(send: F) -> Result<(), Error>
where
    F: Future<Output = Result<(), Error>>,
{
    match tokio::time::timeout(DISPATCH_TIMEOUT, send).await {
        Ok(result) => result,
        Err(_) => Err(Error::Dispatch(
            "notification dispatch timed out".to_string(),
        )),
    }
}

#[cfg(feature = "mailer")]
pub use mail_notifier::MailNotifier;

#[cfg(feature = "mailer")]
mod mail_notifier {
    use async_trait::async_trait;
    use authquest_mailer::prelude::*;

    use crate::Error;

    use super::Notifier;

    /// [`Notifier`] backed by the mailer crate's transports.
    pub struct MailNotifier {
        transport: Box<dyn Mailer>,
        config: MailerConfig,
    }

    impl MailNotifier {
        pub fn new(config: MailerConfig) -> Result<Self, Error> {
            let transport = config
                .build_transport()
                .map_err(|e| Error::Dispatch(e.to_string()))?;
            Ok(Self { transport, config })
        }

        pub fn from_env() -> Result<Self, Error> {
            let config = MailerConfig::from_env().map_err(|e| Error::Dispatch(e.to_string()))?;
            Self::new(config)
        }

        async fn send(&self, email: Email) -> Result<(), Error> {
            self.transport
                .send_email(email)
                .await
                .map_err(|e| Error::Dispatch(e.to_string()))
        }
    }

    #[async_trait]
    impl Notifier for MailNotifier {
        async fn send_verification_email(
            &self,
            to: &str,
            name: &str,
            code: &str,
        ) -> Result<(), Error> {
            let email = VerificationEmail::build(&self.config.from_address(), to, name, code)
                .map_err(|e| Error::Dispatch(e.to_string()))?;
            self.send(email).await
        }

        async fn send_welcome_email(&self, to: &str, name: &str) -> Result<(), Error> {
            let email = WelcomeEmail::build(&self.config.from_address(), to, name)
                .map_err(|e| Error::Dispatch(e.to_string()))?;
            self.send(email).await
        }

        async fn send_reset_email(
            &self,
            to: &str,
            name: &str,
            reset_url: &str,
        ) -> Result<(), Error> {
            let email = ResetRequestEmail::build(&self.config.from_address(), to, name, reset_url)
                .map_err(|e| Error::Dispatch(e.to_string()))?;
            self.send(email).await
        }

        async fn send_reset_success_email(&self, to: &str, name: &str) -> Result<(), Error> {
            let email = ResetSuccessEmail::build(&self.config.from_address(), to, name)
                .map_err(|e| Error::Dispatch(e.to_string()))?;
            self.send(email).await
        }
    }
}
