//! Persistence seam for accounts.

use uuid::Uuid;

use super::Account;
use crate::BoxedError;

/// Failures reported by an [`AccountStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No account matches the lookup.
    #[error("account not found")]
    NotFound,
    /// The username is already taken.
    #[error("username already taken")]
    Conflict,
    /// The backing store could not be reached or failed unexpectedly.
    #[error("account store unavailable: {0}")]
    Unavailable(#[source] BoxedError),
}

impl StoreError {
    /// Wraps a backend failure.
    pub fn unavailable(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Box::new(error))
    }
}

/// Create, read, update and delete operations over accounts.
///
/// Implementations must reject a `create` or `update` that would give two
/// accounts the same username with [`StoreError::Conflict`], atomically with
/// the write.
#[async_trait::async_trait]
pub trait AccountStore: Send + Sync {
    /// Persists a new account.
    async fn create(&self, account: Account) -> Result<Account, StoreError>;

    /// Finds an account by exact username.
    async fn find_by_name(&self, username: &str) -> Result<Account, StoreError>;

    /// Finds an account by identifier.
    async fn find_by_id(&self, account_id: Uuid) -> Result<Account, StoreError>;

    /// Replaces the stored name, credential hash and update time.
    async fn update(&self, account: Account) -> Result<Account, StoreError>;

    /// Removes an account.
    async fn delete(&self, account_id: Uuid) -> Result<(), StoreError>;
}
