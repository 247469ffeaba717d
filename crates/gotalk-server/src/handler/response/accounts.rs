//! Account response types.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::service::Account as AccountModel;

/// Response returned after registration.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredAccount {
    pub id: Uuid,
    pub username: String,
    pub created_at: Timestamp,
}

impl From<AccountModel> for RegisteredAccount {
    fn from(account: AccountModel) -> Self {
        Self {
            id: account.id,
            username: account.username,
            created_at: account.created_at,
        }
    }
}

/// The authenticated account.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<AccountModel> for Account {
    fn from(account: AccountModel) -> Self {
        Self {
            id: account.id,
            username: account.username,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

/// Response returned after an account update.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedAccount {
    pub id: Uuid,
    pub username: String,
    pub updated_at: Timestamp,
}

impl From<AccountModel> for UpdatedAccount {
    fn from(account: AccountModel) -> Self {
        Self {
            id: account.id,
            username: account.username,
            updated_at: account.updated_at,
        }
    }
}
