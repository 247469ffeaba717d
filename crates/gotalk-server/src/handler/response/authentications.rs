//! Authentication response types.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::service::IssuedToken;

/// Response returned after a successful login.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthToken {
    /// Bearer token for the `Authorization` header.
    pub token: String,
    /// Timestamp when the token was issued.
    pub issued_at: Timestamp,
    /// Timestamp when the token expires.
    pub expires_at: Timestamp,
}

impl From<IssuedToken> for AuthToken {
    fn from(issued: IssuedToken) -> Self {
        Self {
            token: issued.token,
            issued_at: issued.issued_at,
            expires_at: issued.expires_at,
        }
    }
}
