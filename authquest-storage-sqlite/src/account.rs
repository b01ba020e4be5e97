use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use authquest_core::{
    Account, AccountId, Error, NewAccount, PasswordHash,
    error::StorageError,
    repository::AccountRepository,
};

pub struct SqliteAccountRepository {
    pool: SqlitePool,
}

impl SqliteAccountRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Row representation with unix-second timestamps.
#[derive(Debug, sqlx::FromRow)]
struct SqliteAccount {
    id: String,
    email: String,
    name: String,
    password_hash: String,
    is_verified: bool,
    verification_code: Option<String>,
    verification_expires_at: Option<i64>,
    reset_token: Option<String>,
    reset_expires_at: Option<i64>,
    last_login_at: Option<i64>,
    created_at: i64,
}

fn from_timestamp(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

impl From<SqliteAccount> for Account {
    fn from(row: SqliteAccount) -> Self {
        Account {
            id: AccountId::from(row.id),
            email: row.email,
            name: row.name,
            password_hash: PasswordHash::new(row.password_hash),
            is_verified: row.is_verified,
            verification_code: row.verification_code,
            verification_expires_at: row.verification_expires_at.map(from_timestamp),
            reset_token: row.reset_token,
            reset_expires_at: row.reset_expires_at.map(from_timestamp),
            last_login_at: row.last_login_at.map(from_timestamp),
            created_at: from_timestamp(row.created_at),
        }
    }
}

fn database_error(e: sqlx::Error) -> Error {
    if let Some(db_err) = e.as_database_error()
        && db_err.is_unique_violation()
    {
        return Error::Conflict;
    }
    Error::Storage(StorageError::Database(e.to_string()))
}

#[async_trait]
impl AccountRepository for SqliteAccountRepository {
    async fn create(&self, account: NewAccount) -> Result<Account, Error> {
        let now = Utc::now().timestamp();

        let row = sqlx::query_as::<_, SqliteAccount>(
            r#"
            INSERT INTO accounts (id, email, name, password_hash, is_verified,
                verification_code, verification_expires_at, created_at)
            VALUES (?1, ?2, ?3, ?4, 0, ?5, ?6, ?7)
            RETURNING *
            "#,
        )
        .bind(account.id.as_str())
        .bind(&account.email)
        .bind(&account.name)
        .bind(account.password_hash.as_str())
        .bind(&account.verification_code)
        .bind(account.verification_expires_at.timestamp())
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, Error> {
        let row = sqlx::query_as::<_, SqliteAccount>("SELECT * FROM accounts WHERE id = ?1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(row.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, Error> {
        let row = sqlx::query_as::<_, SqliteAccount>("SELECT * FROM accounts WHERE email = ?1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(row.map(Into::into))
    }

    async fn find_by_verification_code(&self, code: &str) -> Result<Option<Account>, Error> {
        let row = sqlx::query_as::<_, SqliteAccount>(
            "SELECT * FROM accounts WHERE verification_code = ?1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(row.map(Into::into))
    }

    async fn find_by_reset_token(&self, token: &str) -> Result<Option<Account>, Error> {
        let row =
            sqlx::query_as::<_, SqliteAccount>("SELECT * FROM accounts WHERE reset_token = ?1")
                .bind(token)
                .fetch_optional(&self.pool)
                .await
                .map_err(database_error)?;

        Ok(row.map(Into::into))
    }

    async fn update(&self, account: &Account) -> Result<Account, Error> {
        let row = sqlx::query_as::<_, SqliteAccount>(
            r#"
            UPDATE accounts
            SET email = ?2, name = ?3, password_hash = ?4, is_verified = ?5,
                verification_code = ?6, verification_expires_at = ?7,
                reset_token = ?8, reset_expires_at = ?9, last_login_at = ?10
            WHERE id = ?1
            RETURNING *
            "#,
        )
        .bind(account.id.as_str())
        .bind(&account.email)
        .bind(&account.name)
        .bind(account.password_hash.as_str())
        .bind(account.is_verified)
        .bind(&account.verification_code)
        .bind(account.verification_expires_at.map(|dt| dt.timestamp()))
        .bind(&account.reset_token)
        .bind(account.reset_expires_at.map(|dt| dt.timestamp()))
        .bind(account.last_login_at.map(|dt| dt.timestamp()))
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(row.into())
    }
}
