use authquest_core::Profile;
use serde::{Deserialize, Serialize};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "token";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyEmailRequest {
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    pub password: String,
}

/// Response carrying the account profile as the `user` object.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub user: Profile,
}

impl AuthResponse {
    pub fn new(message: impl Into<String>, user: Profile) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            user,
        }
    }

    pub fn bare(user: Profile) -> Self {
        Self {
            success: true,
            message: None,
            user,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// The session cookie contract.
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub http_only: bool,
    pub secure: bool,
    pub same_site: CookieSameSite,
    pub path: String,
    /// Mirrors the session token validity
    pub max_age: time::Duration,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: SESSION_COOKIE.to_string(),
            http_only: true,
            secure: true,
            same_site: CookieSameSite::Strict,
            path: "/".to_string(),
            max_age: time::Duration::days(7),
        }
    }
}

impl CookieConfig {
    /// Like the default contract, but without `Secure` so cookies work over
    /// plain http on localhost.
    pub fn development() -> Self {
        Self {
            secure: false,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub enum CookieSameSite {
    #[default]
    Strict,
    Lax,
    None,
}
