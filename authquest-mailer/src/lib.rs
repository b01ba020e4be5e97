//! Email delivery for account notifications
//!
//! The crate separates three concerns: what an [`Email`] is, how the four
//! account notifications are rendered ([`templates`]), and how a rendered
//! email leaves the process ([`transports`]). Callers usually go through
//! [`MailerConfig::from_env`] and [`MailerConfig::build_transport`] and only
//! ever hold a `Box<dyn Mailer>`.

pub mod config;
pub mod email;
pub mod error;
pub mod mailer;
pub mod templates;
pub mod transports;

pub use config::MailerConfig;
pub use email::{Email, EmailBuilder};
pub use error::MailerError;
pub use mailer::Mailer;
pub use templates::{ResetRequestEmail, ResetSuccessEmail, VerificationEmail, WelcomeEmail};
pub use transports::{FileTransport, SmtpTransport};

pub mod prelude {
    pub use crate::{
        Email, EmailBuilder, FileTransport, Mailer, MailerConfig, MailerError, ResetRequestEmail,
        ResetSuccessEmail, SmtpTransport, VerificationEmail, WelcomeEmail,
    };
}
