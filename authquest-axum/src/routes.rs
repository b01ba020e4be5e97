use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, SameSite};

use authquest::Auth;
use authquest_core::{AccountRepository, error::SessionError};

use crate::{
    error::Result,
    extractors::{Json, SessionTokenFromCookie},
    types::*,
};

/// Shared state for the authentication handlers
pub struct AuthState<R: AccountRepository> {
    pub auth: Arc<Auth<R>>,
}

impl<R: AccountRepository> Clone for AuthState<R> {
    fn clone(&self) -> Self {
        Self {
            auth: self.auth.clone(),
        }
    }
}

pub fn create_router<R>(auth: Arc<Auth<R>>, cookie_config: CookieConfig) -> Router
where
    R: AccountRepository,
{
    let state = AuthState { auth };

    Router::new()
        .route("/signup", post(signup_handler))
        .route("/signin", post(signin_handler))
        .route("/logout", post(logout_handler))
        .route("/verify-email", post(verify_email_handler))
        .route("/forgot-password", post(forgot_password_handler))
        .route("/reset-password/{token}", post(reset_password_handler))
        .route("/check-auth", get(check_auth_handler))
        .with_state(state)
        .layer(axum::Extension(cookie_config))
}

fn session_cookie(config: &CookieConfig, value: &str) -> Cookie<'static> {
    let same_site = match config.same_site {
        CookieSameSite::Strict => SameSite::Strict,
        CookieSameSite::Lax => SameSite::Lax,
        CookieSameSite::None => SameSite::None,
    };

    Cookie::build((config.name.clone(), value.to_string()))
        .path(config.path.clone())
        .http_only(config.http_only)
        .secure(config.secure)
        .same_site(same_site)
        .max_age(config.max_age)
        .build()
}

fn clearing_cookie(config: &CookieConfig) -> Cookie<'static> {
    Cookie::build((config.name.clone(), String::new()))
        .path(config.path.clone())
        .http_only(config.http_only)
        .max_age(time::Duration::ZERO)
        .build()
}

async fn signup_handler<R>(
    State(state): State<AuthState<R>>,
    axum::Extension(cookie_config): axum::Extension<CookieConfig>,
    Json(payload): Json<SignUpRequest>,
) -> Result<impl IntoResponse>
where
    R: AccountRepository,
{
    let (user, token) = state
        .auth
        .sign_up(&payload.email, &payload.name, &payload.password)
        .await?;

    let cookie = session_cookie(&cookie_config, token.as_str());

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie.to_string())],
        Json(AuthResponse::new("User created successfully", user)),
    ))
}

async fn signin_handler<R>(
    State(state): State<AuthState<R>>,
    axum::Extension(cookie_config): axum::Extension<CookieConfig>,
    Json(payload): Json<SignInRequest>,
) -> Result<impl IntoResponse>
where
    R: AccountRepository,
{
    let (user, token) = state.auth.sign_in(&payload.email, &payload.password).await?;

    let cookie = session_cookie(&cookie_config, token.as_str());

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie.to_string())],
        Json(AuthResponse::new("Logged in successfully", user)),
    ))
}

/// Sessions are stateless, so logout only clears the cookie. Idempotent.
async fn logout_handler(
    axum::Extension(cookie_config): axum::Extension<CookieConfig>,
) -> Result<impl IntoResponse> {
    let cookie = clearing_cookie(&cookie_config);

    Ok((
        [(header::SET_COOKIE, cookie.to_string())],
        Json(MessageResponse::new("Logged out successfully")),
    ))
}

async fn verify_email_handler<R>(
    State(state): State<AuthState<R>>,
    Json(payload): Json<VerifyEmailRequest>,
) -> Result<impl IntoResponse>
where
    R: AccountRepository,
{
    let user = state.auth.verify_email(&payload.code).await?;

    Ok(Json(AuthResponse::new("Email verified successfully", user)))
}

async fn forgot_password_handler<R>(
    State(state): State<AuthState<R>>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> Result<impl IntoResponse>
where
    R: AccountRepository,
{
    state.auth.forgot_password(&payload.email).await?;

    Ok(Json(MessageResponse::new(
        "Password reset link sent to your email",
    )))
}

async fn reset_password_handler<R>(
    State(state): State<AuthState<R>>,
    Path(token): Path<String>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse>
where
    R: AccountRepository,
{
    state.auth.reset_password(&token, &payload.password).await?;

    Ok(Json(MessageResponse::new("Password reset successful")))
}

async fn check_auth_handler<R>(
    State(state): State<AuthState<R>>,
    SessionTokenFromCookie(token): SessionTokenFromCookie,
) -> Result<impl IntoResponse>
where
    R: AccountRepository,
{
    let token = token.ok_or(authquest_core::Error::Session(SessionError::Missing))?;
    let user = state.auth.check_session(&token).await?;

    Ok(Json(AuthResponse::bare(user)))
}
