//! End-to-end account lifecycle tests against in-memory SQLite.

use std::sync::Arc;

use async_trait::async_trait;
use authquest::{Auth, AuthConfig, sqlite::SqliteAccountRepository};
use authquest_core::{Error, Notifier, error::SessionError};
use sqlx::SqlitePool;
use tokio::sync::Mutex;

const SECRET: &[u8] = b"integration_test_signing_secret_not_for_production";
const CLIENT_URL: &str = "https://app.example.com";

/// Captures outbound notifications so tests can read codes and links the way
/// a user would read their inbox.
#[derive(Default)]
struct Outbox {
    verification_codes: Mutex<Vec<(String, String)>>,
    reset_urls: Mutex<Vec<(String, String)>>,
    welcomes: Mutex<Vec<String>>,
    reset_confirmations: Mutex<Vec<String>>,
}

#[async_trait]
impl Notifier for Outbox {
    async fn send_verification_email(&self, to: &str, _name: &str, code: &str) -> Result<(), Error> {
        self.verification_codes
            .lock()
            .await
            .push((to.to_string(), code.to_string()));
        Ok(())
    }

    async fn send_welcome_email(&self, to: &str, _name: &str) -> Result<(), Error> {
        self.welcomes.lock().await.push(to.to_string());
        Ok(())
    }

    async fn send_reset_email(&self, to: &str, _name: &str, reset_url: &str) -> Result<(), Error> {
        self.reset_urls
            .lock()
            .await
            .push((to.to_string(), reset_url.to_string()));
        Ok(())
    }

    async fn send_reset_success_email(&self, to: &str, _name: &str) -> Result<(), Error> {
        self.reset_confirmations.lock().await.push(to.to_string());
        Ok(())
    }
}

async fn setup() -> (Auth<SqliteAccountRepository>, Arc<Outbox>) {
    let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
    authquest::sqlite::migrate(&pool).await.unwrap();

    let outbox = Arc::new(Outbox::default());
    let auth = Auth::new(
        Arc::new(SqliteAccountRepository::new(pool)),
        outbox.clone(),
        AuthConfig::new(SECRET, CLIENT_URL),
    );
    (auth, outbox)
}

#[tokio::test]
async fn test_signup_verify_signin_lifecycle() {
    let (auth, outbox) = setup().await;

    let (profile, token) = auth
        .sign_up("ann@example.com", "Ann", "correct horse battery")
        .await
        .unwrap();
    assert_eq!(profile.email, "ann@example.com");
    assert!(!profile.is_verified);

    // The signup session is immediately usable
    let checked = auth.check_session(&token).await.unwrap();
    assert_eq!(checked.id, profile.id);

    // Verify with the emailed code
    let codes = outbox.verification_codes.lock().await;
    let (to, code) = codes.last().cloned().unwrap();
    drop(codes);
    assert_eq!(to, "ann@example.com");

    let verified = auth.verify_email(&code).await.unwrap();
    assert!(verified.is_verified);
    assert_eq!(
        outbox.welcomes.lock().await.as_slice(),
        ["ann@example.com"]
    );

    // Sign in with the original credentials
    let (signed_in, _token) = auth
        .sign_in("ann@example.com", "correct horse battery")
        .await
        .unwrap();
    assert!(signed_in.is_verified);
    assert!(signed_in.last_login_at.is_some());
}

#[tokio::test]
async fn test_duplicate_signup_is_rejected() {
    let (auth, _outbox) = setup().await;

    auth.sign_up("ann@example.com", "Ann", "correct horse battery")
        .await
        .unwrap();

    let result = auth
        .sign_up("ann@example.com", "Imposter", "another password")
        .await;
    assert!(matches!(result, Err(Error::Conflict)));
}

#[tokio::test]
async fn test_verify_email_rejects_wrong_code() {
    let (auth, outbox) = setup().await;

    auth.sign_up("ann@example.com", "Ann", "correct horse battery")
        .await
        .unwrap();

    let real_code = outbox.verification_codes.lock().await[0].1.clone();
    let wrong_code = if real_code == "111111" { "222222" } else { "111111" };

    let result = auth.verify_email(wrong_code).await;
    assert!(matches!(result, Err(Error::InvalidOrExpiredToken)));

    // The real code still works afterwards
    assert!(auth.verify_email(&real_code).await.is_ok());
}

#[tokio::test]
async fn test_password_reset_lifecycle() {
    let (auth, outbox) = setup().await;

    auth.sign_up("ann@example.com", "Ann", "correct horse battery")
        .await
        .unwrap();

    auth.forgot_password("ann@example.com").await.unwrap();

    let reset_urls = outbox.reset_urls.lock().await;
    let (_, url) = reset_urls.last().cloned().unwrap();
    drop(reset_urls);

    let prefix = format!("{CLIENT_URL}/reset-password/");
    assert!(url.starts_with(&prefix));
    let token = url.strip_prefix(&prefix).unwrap().to_string();
    assert_eq!(token.len(), 40);

    auth.reset_password(&token, "a brand new password")
        .await
        .unwrap();
    assert_eq!(
        outbox.reset_confirmations.lock().await.as_slice(),
        ["ann@example.com"]
    );

    // Old credential dead, new one works, token single use
    assert!(matches!(
        auth.sign_in("ann@example.com", "correct horse battery").await,
        Err(Error::InvalidCredentials)
    ));
    assert!(
        auth.sign_in("ann@example.com", "a brand new password")
            .await
            .is_ok()
    );
    assert!(matches!(
        auth.reset_password(&token, "yet another password").await,
        Err(Error::InvalidOrExpiredToken)
    ));
}

#[tokio::test]
async fn test_forgot_password_unknown_email() {
    let (auth, outbox) = setup().await;

    let result = auth.forgot_password("nobody@example.com").await;
    assert!(matches!(result, Err(Error::NotFound)));
    assert!(outbox.reset_urls.lock().await.is_empty());
}

#[tokio::test]
async fn test_check_session_rejects_bad_tokens() {
    let (auth, _outbox) = setup().await;

    let (_profile, token) = auth
        .sign_up("ann@example.com", "Ann", "correct horse battery")
        .await
        .unwrap();

    // Token signed with a different secret
    let other_pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
    authquest::sqlite::migrate(&other_pool).await.unwrap();
    let other_auth = Auth::new(
        Arc::new(SqliteAccountRepository::new(other_pool)),
        Arc::new(Outbox::default()),
        AuthConfig::new(b"some other secret entirely".to_vec(), CLIENT_URL),
    );
    let (_p, forged) = other_auth
        .sign_up("ann@example.com", "Ann", "correct horse battery")
        .await
        .unwrap();

    let result = auth.check_session(&forged).await;
    assert!(matches!(
        result,
        Err(Error::Session(SessionError::InvalidToken(_)))
    ));

    // The genuine token still authenticates
    assert!(auth.check_session(&token).await.is_ok());
}
