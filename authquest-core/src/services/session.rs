use std::sync::Arc;

use crate::{
    Error,
    account::{Account, AccountId},
    repository::AccountRepository,
    session::{SessionConfig, SessionToken},
};

/// Service for issuing session tokens and resolving them back to accounts
pub struct SessionService<R: AccountRepository> {
    repository: Arc<R>,
    config: SessionConfig,
}

impl<R: AccountRepository> SessionService<R> {
    pub fn new(repository: Arc<R>, config: SessionConfig) -> Self {
        Self { repository, config }
    }

    /// Issue a signed session token for the given account
    pub fn issue_token(&self, account_id: &AccountId) -> Result<SessionToken, Error> {
        Ok(SessionToken::issue(account_id, &self.config)?)
    }

    /// Resolve a presented token to its account
    ///
    /// Signature and expiry failures surface as session errors; a valid
    /// token whose account no longer exists maps to [`Error::Unauthorized`].
    pub async fn authenticate(&self, token: &SessionToken) -> Result<Account, Error> {
        let claims = token.verify(&self.config)?;
        let account_id = AccountId::from(claims.sub);

        self.repository
            .find_by_id(&account_id)
            .await?
            .ok_or(Error::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        AccountService,
        error::SessionError,
        services::test_support::{MockAccountRepository, RecordingNotifier},
    };
    use chrono::Duration;

    const TEST_SECRET: &[u8] = b"test_secret_key_for_hs256_session_tokens_not_for_production";

    async fn setup() -> (Arc<MockAccountRepository>, Account) {
        let repo = Arc::new(MockAccountRepository::default());
        let account = AccountService::new(repo.clone(), Arc::new(RecordingNotifier::default()))
            .sign_up("ann@example.com", "Ann", "hunter2hunter2")
            .await
            .unwrap();
        (repo, account)
    }

    #[tokio::test]
    async fn test_issue_and_authenticate() {
        let (repo, account) = setup().await;
        let service = SessionService::new(repo, SessionConfig::new(TEST_SECRET));

        let token = service.issue_token(&account.id).unwrap();
        let resolved = service.authenticate(&token).await.unwrap();

        assert_eq!(resolved.id, account.id);
        assert_eq!(resolved.email, account.email);
    }

    #[tokio::test]
    async fn test_authenticate_rejects_forged_token() {
        let (repo, account) = setup().await;
        let service = SessionService::new(repo.clone(), SessionConfig::new(TEST_SECRET));

        let forged = SessionService::new(
            repo,
            SessionConfig::new(b"a completely different secret value".to_vec()),
        )
        .issue_token(&account.id)
        .unwrap();

        let result = service.authenticate(&forged).await;
        assert!(matches!(
            result,
            Err(Error::Session(SessionError::InvalidToken(_)))
        ));
    }

    #[tokio::test]
    async fn test_authenticate_rejects_expired_token() {
        let (repo, account) = setup().await;
        let expired_config =
            SessionConfig::new(TEST_SECRET).with_ttl(Duration::hours(-2));
        let service = SessionService::new(repo.clone(), expired_config);

        let token = service.issue_token(&account.id).unwrap();
        let result = service.authenticate(&token).await;
        assert!(matches!(result, Err(Error::Session(SessionError::Expired))));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_account() {
        let (repo, _account) = setup().await;
        let service = SessionService::new(repo, SessionConfig::new(TEST_SECRET));

        let token = service.issue_token(&AccountId::new_random()).unwrap();
        let result = service.authenticate(&token).await;
        assert!(matches!(result, Err(Error::Unauthorized)));
    }
}
