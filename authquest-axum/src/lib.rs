//! # AuthQuest Axum Integration
//!
//! Ready-to-use Axum routes for the authquest service: signup, signin,
//! logout, email verification, the password reset pair, and a cookie-backed
//! session check. The session token travels in an HttpOnly cookie named
//! `token`.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use axum::Router;
//! use authquest::{Auth, AuthConfig, sqlite::SqliteAccountRepository};
//! use authquest_core::services::MailNotifier;
//! use authquest_axum::{routes, CookieConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let pool = sqlx::SqlitePool::connect("sqlite:authquest.db").await.unwrap();
//!     authquest::sqlite::migrate(&pool).await.unwrap();
//!
//!     let auth = Arc::new(Auth::new(
//!         Arc::new(SqliteAccountRepository::new(pool)),
//!         Arc::new(MailNotifier::from_env().unwrap()),
//!         AuthConfig::new(b"signing secret".to_vec(), "https://app.example.com"),
//!     ));
//!
//!     let app = Router::new().nest(
//!         "/api/auth",
//!         routes(auth).with_cookie_config(CookieConfig::development()).build(),
//!     );
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```

mod error;
mod extractors;
mod routes;
mod types;

pub use error::{ApiError, Result};
pub use extractors::{Json, SessionTokenFromCookie};
pub use routes::{AuthState, create_router};
pub use types::{
    AuthResponse, CookieConfig, CookieSameSite, ForgotPasswordRequest, MessageResponse,
    ResetPasswordRequest, SESSION_COOKIE, SignInRequest, SignUpRequest, VerifyEmailRequest,
};

use authquest::Auth;
use authquest_core::AccountRepository;
use axum::Router;
use std::sync::Arc;

/// Create authentication routes for your Axum application.
///
/// Returns a builder so the cookie contract can be adjusted before the
/// router is built. The router can be nested at any path.
pub fn routes<R>(auth: Arc<Auth<R>>) -> AuthRouterBuilder<R>
where
    R: AccountRepository,
{
    AuthRouterBuilder {
        auth,
        cookie_config: CookieConfig::default(),
    }
}

/// Builder for configuring authentication routes
pub struct AuthRouterBuilder<R: AccountRepository> {
    auth: Arc<Auth<R>>,
    cookie_config: CookieConfig,
}

impl<R: AccountRepository> AuthRouterBuilder<R> {
    /// Set custom cookie configuration
    pub fn with_cookie_config(mut self, config: CookieConfig) -> Self {
        self.cookie_config = config;
        self
    }

    /// Build the router with the configured options
    pub fn build(self) -> Router {
        create_router(self.auth, self.cookie_config)
    }
}

impl<R: AccountRepository> From<AuthRouterBuilder<R>> for Router {
    fn from(builder: AuthRouterBuilder<R>) -> Self {
        builder.build()
    }
}
