//! SQLite storage backend
//!
//! Accounts live in a single `accounts` table. Timestamps are stored as unix
//! seconds; booleans as integers. Email uniqueness is enforced by the
//! database, so concurrent signups race safely.

mod account;

pub use account::SqliteAccountRepository;

use authquest_core::{Error, error::StorageError};
use sqlx::SqlitePool;

/// Create the schema if it does not exist yet. Safe to run on every start.
pub async fn migrate(pool: &SqlitePool) -> Result<(), Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS accounts (
            id TEXT PRIMARY KEY,
            email TEXT NOT NULL,
            name TEXT NOT NULL,
            password_hash TEXT NOT NULL,
            is_verified INTEGER NOT NULL DEFAULT 0,
            verification_code TEXT,
            verification_expires_at INTEGER,
            reset_token TEXT,
            reset_expires_at INTEGER,
            last_login_at INTEGER,
            created_at INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| Error::Storage(StorageError::Database(e.to_string())))?;

    for statement in [
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_accounts_email ON accounts (email)",
        "CREATE INDEX IF NOT EXISTS idx_accounts_verification_code ON accounts (verification_code)",
        "CREATE INDEX IF NOT EXISTS idx_accounts_reset_token ON accounts (reset_token)",
    ] {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| Error::Storage(StorageError::Database(e.to_string())))?;
    }

    tracing::debug!("Applied sqlite schema");

    Ok(())
}

/// Open a pool for the given sqlite URL.
pub async fn connect(url: &str) -> Result<SqlitePool, Error> {
    SqlitePool::connect(url)
        .await
        .map_err(|e| Error::Storage(StorageError::Connection(e.to_string())))
}
