//! Authentication request types.

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validate_username;

/// Request payload for registration and login.
#[must_use]
#[derive(Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// Username of the account.
    #[validate(custom(function = "validate_username"))]
    pub username: String,

    /// Password of the account.
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Request payload for registration.
pub type Register = Credentials;

/// Request payload for login.
pub type Login = Credentials;
