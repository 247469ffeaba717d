//! Account orchestration over an [`AccountStore`].

use std::fmt;
use std::sync::Arc;

use jiff::Timestamp;
use uuid::Uuid;

use super::{Account, AccountStore, StoreError, TRACING_TARGET_ACCOUNT};
use crate::BoxedError;
use crate::service::security::{HashingFailed, PasswordHasher, PasswordPolicy, PolicyViolation};

/// Account operation failures.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// The password breaks a composition rule.
    #[error(transparent)]
    PolicyViolation(#[from] PolicyViolation),
    /// Unknown username or wrong password.
    #[error("invalid username or password")]
    InvalidCredentials,
    /// The username is already taken.
    #[error("account already exists")]
    AccountAlreadyExists,
    /// No account matches the identifier or username.
    #[error("account not found")]
    AccountNotFound,
    /// The password could not be hashed.
    #[error(transparent)]
    HashingFailed(#[from] HashingFailed),
    /// The account store failed.
    #[error("account store unavailable")]
    StoreUnavailable(#[source] BoxedError),
    /// An update carried neither a username nor a password.
    #[error("update must change the username or the password")]
    EmptyUpdate,
}

impl From<StoreError> for AccountError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound => Self::AccountNotFound,
            StoreError::Conflict => Self::AccountAlreadyExists,
            StoreError::Unavailable(source) => Self::StoreUnavailable(source),
        }
    }
}

/// Sparse account update. `None` leaves the field unchanged.
#[derive(Default, Clone)]
pub struct AccountUpdate {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl AccountUpdate {
    /// Returns whether the update changes nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.password.is_none()
    }
}

impl fmt::Debug for AccountUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountUpdate")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Registration, authentication and lifecycle of accounts.
///
/// Nothing is written to the store unless the password passes the policy
/// and hashes successfully.
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn AccountStore>,
    policy: PasswordPolicy,
    hasher: PasswordHasher,
}

impl fmt::Debug for AccountService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountService").finish_non_exhaustive()
    }
}

impl AccountService {
    /// Creates a new account service over `store`.
    pub fn new<S>(store: S) -> Self
    where
        S: AccountStore + 'static,
    {
        Self::from_arc(Arc::new(store))
    }

    /// Creates a new account service over a shared store.
    pub fn from_arc(store: Arc<dyn AccountStore>) -> Self {
        Self {
            store,
            policy: PasswordPolicy::new(),
            hasher: PasswordHasher::new(),
        }
    }

    /// Registers a new account.
    ///
    /// A name collision is reported as [`AccountError::AccountAlreadyExists`]
    /// whether it is caught by the lookup or by the store on insert.
    pub async fn register(&self, username: &str, password: &str) -> Result<Account, AccountError> {
        match self.store.find_by_name(username).await {
            Ok(_) => return Err(AccountError::AccountAlreadyExists),
            Err(StoreError::NotFound) => {}
            Err(error) => return Err(error.into()),
        }

        self.policy.validate(password)?;
        let password_hash = self.hasher.hash_password(password)?;

        let account = self
            .store
            .create(Account::new(username, password_hash))
            .await?;

        tracing::info!(
            target: TRACING_TARGET_ACCOUNT,
            account_id = %account.id,
            "account registered"
        );

        Ok(account)
    }

    /// Checks a username and password pair.
    ///
    /// Unknown names and wrong passwords are indistinguishable to the caller.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Account, AccountError> {
        let account = match self.store.find_by_name(username).await {
            Ok(account) => account,
            Err(StoreError::NotFound) => {
                self.hasher.verify_dummy_password(password);
                tracing::debug!(
                    target: TRACING_TARGET_ACCOUNT,
                    "authentication failed: unknown username"
                );
                return Err(AccountError::InvalidCredentials);
            }
            Err(error) => return Err(error.into()),
        };

        if !self.hasher.verify_password(password, &account.password_hash) {
            tracing::debug!(
                target: TRACING_TARGET_ACCOUNT,
                account_id = %account.id,
                "authentication failed: wrong password"
            );
            return Err(AccountError::InvalidCredentials);
        }

        Ok(account)
    }

    /// Looks up an account by identifier.
    pub async fn get_by_id(&self, account_id: Uuid) -> Result<Account, AccountError> {
        Ok(self.store.find_by_id(account_id).await?)
    }

    /// Looks up an account by username.
    pub async fn get_by_username(&self, username: &str) -> Result<Account, AccountError> {
        Ok(self.store.find_by_name(username).await?)
    }

    /// Applies a sparse update and returns the stored account.
    pub async fn update_account(
        &self,
        account_id: Uuid,
        update: AccountUpdate,
    ) -> Result<Account, AccountError> {
        if update.is_empty() {
            return Err(AccountError::EmptyUpdate);
        }

        let mut account = self.store.find_by_id(account_id).await?;

        if let Some(username) = update.username {
            account.username = username;
        }

        if let Some(password) = update.password {
            self.policy.validate(&password)?;
            account.password_hash = self.hasher.hash_password(&password)?;
        }

        account.updated_at = Timestamp::now().max(account.created_at);
        let account = self.store.update(account).await?;

        tracing::info!(
            target: TRACING_TARGET_ACCOUNT,
            account_id = %account.id,
            "account updated"
        );

        Ok(account)
    }

    /// Permanently deletes an account.
    pub async fn delete_account(&self, account_id: Uuid) -> Result<(), AccountError> {
        self.store.delete(account_id).await?;

        tracing::info!(
            target: TRACING_TARGET_ACCOUNT,
            account_id = %account_id,
            "account deleted"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::service::account::MemoryAccountStore;

    /// Store whose lookups never find anything, so only the insert can
    /// detect a duplicate name.
    struct BlindLookupStore(MemoryAccountStore);

    #[async_trait::async_trait]
    impl AccountStore for BlindLookupStore {
        async fn create(&self, account: Account) -> Result<Account, StoreError> {
            self.0.create(account).await
        }

        async fn find_by_name(&self, _username: &str) -> Result<Account, StoreError> {
            Err(StoreError::NotFound)
        }

        async fn find_by_id(&self, account_id: Uuid) -> Result<Account, StoreError> {
            self.0.find_by_id(account_id).await
        }

        async fn update(&self, account: Account) -> Result<Account, StoreError> {
            self.0.update(account).await
        }

        async fn delete(&self, account_id: Uuid) -> Result<(), StoreError> {
            self.0.delete(account_id).await
        }
    }

    struct UnavailableStore;

    fn unavailable() -> StoreError {
        StoreError::unavailable(io::Error::new(io::ErrorKind::ConnectionRefused, "down"))
    }

    #[async_trait::async_trait]
    impl AccountStore for UnavailableStore {
        async fn create(&self, _account: Account) -> Result<Account, StoreError> {
            Err(unavailable())
        }

        async fn find_by_name(&self, _username: &str) -> Result<Account, StoreError> {
            Err(unavailable())
        }

        async fn find_by_id(&self, _account_id: Uuid) -> Result<Account, StoreError> {
            Err(unavailable())
        }

        async fn update(&self, _account: Account) -> Result<Account, StoreError> {
            Err(unavailable())
        }

        async fn delete(&self, _account_id: Uuid) -> Result<(), StoreError> {
            Err(unavailable())
        }
    }

    fn update_password(password: &str) -> AccountUpdate {
        AccountUpdate {
            password: Some(password.to_owned()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn register_authenticate_and_change_password() -> anyhow::Result<()> {
        let service = AccountService::new(MemoryAccountStore::new());

        let alice = service.register("alice", "Str0ngPass!").await?;
        assert_eq!(alice.username, "alice");
        assert_eq!(alice.created_at, alice.updated_at);
        assert_eq!(alice.id.get_version_num(), 4);

        let authenticated = service.authenticate("alice", "Str0ngPass!").await?;
        assert_eq!(authenticated.id, alice.id);

        assert!(matches!(
            service.authenticate("alice", "WrongPass1!").await,
            Err(AccountError::InvalidCredentials)
        ));
        assert!(matches!(
            service.authenticate("bob", "Str0ngPass!").await,
            Err(AccountError::InvalidCredentials)
        ));

        let updated = service
            .update_account(alice.id, update_password("NewStr0ng!"))
            .await?;
        assert!(updated.updated_at >= updated.created_at);

        service.authenticate("alice", "NewStr0ng!").await?;
        assert!(matches!(
            service.authenticate("alice", "Str0ngPass!").await,
            Err(AccountError::InvalidCredentials)
        ));
        Ok(())
    }

    #[tokio::test]
    async fn register_rejects_taken_name() -> anyhow::Result<()> {
        let service = AccountService::new(MemoryAccountStore::new());
        service.register("alice", "Str0ngPass!").await?;

        assert!(matches!(
            service.register("alice", "An0therPass!").await,
            Err(AccountError::AccountAlreadyExists)
        ));
        Ok(())
    }

    #[tokio::test]
    async fn store_conflict_is_already_exists() -> anyhow::Result<()> {
        let service = AccountService::new(BlindLookupStore(MemoryAccountStore::new()));
        service.register("alice", "Str0ngPass!").await?;

        assert!(matches!(
            service.register("alice", "Str0ngPass!").await,
            Err(AccountError::AccountAlreadyExists)
        ));
        Ok(())
    }

    #[tokio::test]
    async fn policy_violation_writes_nothing() {
        let store = MemoryAccountStore::new();
        let service = AccountService::new(store.clone());

        assert!(matches!(
            service.register("alice", "short").await,
            Err(AccountError::PolicyViolation(PolicyViolation::TooShort))
        ));
        assert!(matches!(
            service.register("alice", "abcdefghij").await,
            Err(AccountError::PolicyViolation(PolicyViolation::MissingDigit))
        ));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn update_rejects_weak_password_and_keeps_record() -> anyhow::Result<()> {
        let service = AccountService::new(MemoryAccountStore::new());
        let alice = service.register("alice", "Str0ngPass!").await?;

        let update = AccountUpdate {
            username: Some("alicia".to_owned()),
            password: Some("weak".to_owned()),
        };
        assert!(matches!(
            service.update_account(alice.id, update).await,
            Err(AccountError::PolicyViolation(PolicyViolation::TooShort))
        ));

        let stored = service.get_by_id(alice.id).await?;
        assert_eq!(stored, alice);
        Ok(())
    }

    #[tokio::test]
    async fn update_username() -> anyhow::Result<()> {
        let service = AccountService::new(MemoryAccountStore::new());
        let alice = service.register("alice", "Str0ngPass!").await?;
        service.register("bob", "Str0ngPass!").await?;

        let rename = |username: &str| AccountUpdate {
            username: Some(username.to_owned()),
            ..Default::default()
        };

        assert!(matches!(
            service.update_account(alice.id, rename("bob")).await,
            Err(AccountError::AccountAlreadyExists)
        ));

        let renamed = service.update_account(alice.id, rename("alicia")).await?;
        assert_eq!(renamed.username, "alicia");
        assert_eq!(renamed.password_hash, alice.password_hash);
        assert_eq!(service.get_by_username("alicia").await?.id, alice.id);
        assert!(matches!(
            service.get_by_username("alice").await,
            Err(AccountError::AccountNotFound)
        ));
        Ok(())
    }

    #[tokio::test]
    async fn update_requires_a_change() -> anyhow::Result<()> {
        let service = AccountService::new(MemoryAccountStore::new());
        let alice = service.register("alice", "Str0ngPass!").await?;

        assert!(matches!(
            service.update_account(alice.id, AccountUpdate::default()).await,
            Err(AccountError::EmptyUpdate)
        ));
        Ok(())
    }

    #[tokio::test]
    async fn missing_accounts_are_not_found() {
        let service = AccountService::new(MemoryAccountStore::new());
        let account_id = Uuid::new_v4();

        assert!(matches!(
            service.get_by_id(account_id).await,
            Err(AccountError::AccountNotFound)
        ));
        assert!(matches!(
            service.update_account(account_id, update_password("NewStr0ng!")).await,
            Err(AccountError::AccountNotFound)
        ));
        assert!(matches!(
            service.delete_account(account_id).await,
            Err(AccountError::AccountNotFound)
        ));
    }

    #[tokio::test]
    async fn delete_account() -> anyhow::Result<()> {
        let service = AccountService::new(MemoryAccountStore::new());
        let alice = service.register("alice", "Str0ngPass!").await?;

        service.delete_account(alice.id).await?;
        assert!(matches!(
            service.authenticate("alice", "Str0ngPass!").await,
            Err(AccountError::InvalidCredentials)
        ));
        assert!(matches!(
            service.delete_account(alice.id).await,
            Err(AccountError::AccountNotFound)
        ));
        Ok(())
    }

    #[tokio::test]
    async fn store_failures_are_unavailable() {
        let service = AccountService::new(UnavailableStore);

        assert!(matches!(
            service.register("alice", "Str0ngPass!").await,
            Err(AccountError::StoreUnavailable(_))
        ));
        assert!(matches!(
            service.authenticate("alice", "Str0ngPass!").await,
            Err(AccountError::StoreUnavailable(_))
        ));
        assert!(matches!(
            service.get_by_id(Uuid::new_v4()).await,
            Err(AccountError::StoreUnavailable(_))
        ));
    }
}
