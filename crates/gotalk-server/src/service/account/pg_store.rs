//! PostgreSQL-backed [`AccountStore`].

use gotalk_postgres::query::AccountRepository;
use gotalk_postgres::{PgClient, PgError};
use uuid::Uuid;

use super::{Account, AccountStore, StoreError, TRACING_TARGET_ACCOUNT};

/// [`AccountStore`] over a pooled PostgreSQL client.
#[derive(Debug, Clone)]
pub struct PgAccountStore {
    pg: PgClient,
}

impl PgAccountStore {
    /// Creates a new store over `pg`.
    pub fn new(pg: PgClient) -> Self {
        Self { pg }
    }
}

impl From<PgError> for StoreError {
    fn from(error: PgError) -> Self {
        if error.is_unique_violation() {
            tracing::debug!(
                target: TRACING_TARGET_ACCOUNT,
                constraint = ?error.account_constraint(),
                "username already taken"
            );
            return Self::Conflict;
        }

        tracing::error!(
            target: TRACING_TARGET_ACCOUNT,
            error = %error,
            transient = error.is_transient(),
            "account store operation failed"
        );
        Self::unavailable(error)
    }
}

#[async_trait::async_trait]
impl AccountStore for PgAccountStore {
    async fn create(&self, account: Account) -> Result<Account, StoreError> {
        let mut conn = self.pg.get_connection().await?;
        let account = conn.create_account(account.into()).await?;
        Ok(account.into())
    }

    async fn find_by_name(&self, username: &str) -> Result<Account, StoreError> {
        let mut conn = self.pg.get_connection().await?;
        let account = conn.find_account_by_username(username).await?;
        account.map(Account::from).ok_or(StoreError::NotFound)
    }

    async fn find_by_id(&self, account_id: Uuid) -> Result<Account, StoreError> {
        let mut conn = self.pg.get_connection().await?;
        let account = conn.find_account_by_id(account_id).await?;
        account.map(Account::from).ok_or(StoreError::NotFound)
    }

    async fn update(&self, account: Account) -> Result<Account, StoreError> {
        let mut conn = self.pg.get_connection().await?;
        let account_id = account.id;
        let account = conn.update_account(account_id, account.into()).await?;
        account.map(Account::from).ok_or(StoreError::NotFound)
    }

    async fn delete(&self, account_id: Uuid) -> Result<(), StoreError> {
        let mut conn = self.pg.get_connection().await?;
        if conn.delete_account(account_id).await? {
            Ok(())
        } else {
            Err(StoreError::NotFound)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_failures_are_unavailable() {
        let error = StoreError::from(PgError::Pool("pool is closed".to_owned()));
        assert!(matches!(error, StoreError::Unavailable(_)));
    }

    #[test]
    fn config_failures_are_unavailable() {
        let error = StoreError::from(PgError::Config("bad url".to_owned()));
        assert!(matches!(error, StoreError::Unavailable(_)));
    }
}
