use async_trait::async_trait;

use crate::{
    Error,
    account::{Account, AccountId, NewAccount},
};

/// Repository for account data access
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Create a new account
    async fn create(&self, account: NewAccount) -> Result<Account, Error>;

    /// Find an account by ID
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, Error>;

    /// Find an account by exact email match
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, Error>;

    /// Find an account with the given pending verification code
    async fn find_by_verification_code(&self, code: &str) -> Result<Option<Account>, Error>;

    /// Find an account with the given pending reset token
    async fn find_by_reset_token(&self, token: &str) -> Result<Option<Account>, Error>;

    /// Update an existing account
    async fn update(&self, account: &Account) -> Result<Account, Error>;
}
