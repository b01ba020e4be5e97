use crate::{Email, MailerError};
use async_trait::async_trait;

/// A way of getting a rendered email out of the process.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_email(&self, email: Email) -> Result<(), MailerError>;
}
