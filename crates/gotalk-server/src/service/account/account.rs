use std::fmt;

use jiff::Timestamp;
use uuid::Uuid;

/// A registered identity.
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    /// Random (v4) identifier, assigned at registration.
    pub id: Uuid,
    /// Unique display name.
    pub username: String,
    /// PHC-formatted credential hash.
    pub password_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Account {
    /// Creates a new account with a fresh identifier.
    ///
    /// Both timestamps are set to the current time.
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        let now = Timestamp::now();
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            password_hash: password_hash.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

impl From<gotalk_postgres::model::Account> for Account {
    fn from(account: gotalk_postgres::model::Account) -> Self {
        Self {
            id: account.id,
            created_at: account.created_at(),
            updated_at: account.updated_at(),
            username: account.username,
            password_hash: account.password_hash,
        }
    }
}

impl From<Account> for gotalk_postgres::model::NewAccount {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            password_hash: account.password_hash,
            created_at: account.created_at.into(),
            updated_at: account.updated_at.into(),
        }
    }
}

impl From<Account> for gotalk_postgres::model::UpdateAccount {
    fn from(account: Account) -> Self {
        Self {
            username: Some(account.username),
            password_hash: Some(account.password_hash),
            updated_at: Some(account.updated_at.into()),
        }
    }
}
