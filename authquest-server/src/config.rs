use anyhow::{Context, bail};

/// Server configuration, read once at startup from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on (`PORT`, default 5000)
    pub port: u16,
    /// Database connection string (`DATABASE_URL`, default `sqlite:authquest.db`)
    pub database_url: String,
    /// Session signing secret (`JWT_SECRET`, required)
    pub jwt_secret: String,
    /// Frontend base URL for reset links (`CLIENT_URL`)
    pub client_url: String,
    /// Deployment environment (`APP_ENV`); production enables Secure cookies
    pub environment: Environment,
    /// Allowed CORS origin (`CORS_ORIGIN`, defaults to the client URL)
    pub cors_origin: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn parse(value: &str) -> anyhow::Result<Self> {
        match value.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => bail!("Unknown APP_ENV value: {other}"),
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let port = match std::env::var("PORT") {
            Ok(value) => value.parse().context("PORT must be a number")?,
            Err(_) => 5000,
        };

        let jwt_secret = std::env::var("JWT_SECRET")
            .context("JWT_SECRET must be set to a long random value")?;
        if jwt_secret.len() < 32 {
            bail!("JWT_SECRET must be at least 32 bytes");
        }

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:authquest.db".to_string());

        let client_url = std::env::var("CLIENT_URL")
            .unwrap_or_else(|_| "http://localhost:5173".to_string());

        let environment = match std::env::var("APP_ENV") {
            Ok(value) => Environment::parse(&value)?,
            Err(_) => Environment::Development,
        };

        let cors_origin = std::env::var("CORS_ORIGIN").unwrap_or_else(|_| client_url.clone());

        Ok(Self {
            port,
            database_url,
            jwt_secret,
            client_url,
            environment,
            cors_origin,
        })
    }
}
