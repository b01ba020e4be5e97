mod config;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    http::{HeaderValue, Method, header::CONTENT_TYPE},
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::EnvFilter;

use authquest::{Auth, AuthConfig, sqlite::SqliteAccountRepository};
use authquest_axum::{CookieConfig, routes};
use authquest_core::services::MailNotifier;

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;

    let pool = authquest::sqlite::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    authquest::sqlite::migrate(&pool)
        .await
        .context("Failed to apply database schema")?;

    let notifier = MailNotifier::from_env().context("Failed to configure mailer")?;

    let auth = Arc::new(Auth::new(
        Arc::new(SqliteAccountRepository::new(pool)),
        Arc::new(notifier),
        AuthConfig::new(config.jwt_secret.clone().into_bytes(), &config.client_url),
    ));

    let cookie_config = if config.environment.is_production() {
        CookieConfig::default()
    } else {
        CookieConfig::development()
    };

    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .context("CORS_ORIGIN is not a valid header value")?;
    let cors = CorsLayer::new()
        .allow_headers([CONTENT_TYPE])
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(AllowOrigin::exact(origin))
        .allow_credentials(true);

    let app = Router::new()
        .nest(
            "/api/auth",
            routes(auth).with_cookie_config(cookie_config).build(),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let listener = TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("Failed to bind port {}", config.port))?;

    tracing::info!(port = config.port, env = ?config.environment, "Listening");

    axum::serve(listener, app)
        .await
        .context("Server exited with an error")?;

    Ok(())
}
