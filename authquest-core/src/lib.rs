//! Core functionality for the authquest authentication service
//!
//! This crate contains the account entity, the error taxonomy, the credential
//! hasher, the token generators, the signed session-token contract, and the
//! services that drive an account through its lifecycle (signup, email
//! verification, sign-in, password reset).
//!
//! Storage and email delivery are external collaborators: the crate only
//! defines the [`repository::AccountRepository`] and
//! [`services::Notifier`] seams that backends plug into.

pub mod account;
pub mod crypto;
pub mod error;
pub mod id;
pub mod repository;
pub mod services;
pub mod session;
pub mod token;
pub mod validation;

pub use account::{Account, AccountId, NewAccount, PasswordHash, Profile};
pub use error::Error;
pub use repository::AccountRepository;
pub use services::{
    AccountService, EmailVerificationService, Notifier, PasswordResetService, SessionService,
};
pub use session::{SessionConfig, SessionToken};

#[cfg(feature = "mailer")]
pub use services::MailNotifier;
