//! Account request types.

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Normalized, validate_username};
use crate::service::AccountUpdate;

/// Request payload to update the authenticated account.
///
/// Absent fields are left unchanged.
#[must_use]
#[derive(Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccount {
    /// New username.
    #[validate(custom(function = "validate_username"))]
    pub username: Option<String>,

    /// New password.
    pub password: Option<String>,
}

impl UpdateAccount {
    /// Converts the payload into a service update.
    pub fn into_account_update(self) -> AccountUpdate {
        AccountUpdate {
            username: self.username.map(|username| username.normalized_string()),
            password: self.password,
        }
    }
}

impl fmt::Debug for UpdateAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateAccount")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
