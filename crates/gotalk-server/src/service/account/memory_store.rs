//! In-process [`AccountStore`].

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Account, AccountStore, StoreError};

/// [`AccountStore`] keeping accounts in memory.
///
/// Intended for tests and local runs without a database. Username uniqueness
/// is checked under the write lock, so concurrent registrations of the same
/// name conflict exactly like they do against PostgreSQL.
#[derive(Debug, Clone, Default)]
pub struct MemoryAccountStore {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
}

impl MemoryAccountStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored accounts.
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    /// Returns whether the store holds no accounts.
    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

fn name_taken(accounts: &HashMap<Uuid, Account>, username: &str, except: Uuid) -> bool {
    accounts
        .values()
        .any(|account| account.id != except && account.username == username)
}

#[async_trait::async_trait]
impl AccountStore for MemoryAccountStore {
    async fn create(&self, account: Account) -> Result<Account, StoreError> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&account.id) || name_taken(&accounts, &account.username, account.id)
        {
            return Err(StoreError::Conflict);
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn find_by_name(&self, username: &str) -> Result<Account, StoreError> {
        let accounts = self.accounts.read().await;
        accounts
            .values()
            .find(|account| account.username == username)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn find_by_id(&self, account_id: Uuid) -> Result<Account, StoreError> {
        let accounts = self.accounts.read().await;
        accounts.get(&account_id).cloned().ok_or(StoreError::NotFound)
    }

    async fn update(&self, account: Account) -> Result<Account, StoreError> {
        let mut accounts = self.accounts.write().await;
        if name_taken(&accounts, &account.username, account.id) {
            return Err(StoreError::Conflict);
        }

        let stored = accounts.get_mut(&account.id).ok_or(StoreError::NotFound)?;
        stored.username = account.username;
        stored.password_hash = account.password_hash;
        stored.updated_at = account.updated_at;
        Ok(stored.clone())
    }

    async fn delete(&self, account_id: Uuid) -> Result<(), StoreError> {
        let mut accounts = self.accounts.write().await;
        accounts
            .remove(&account_id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}
