//! Application state and dependency injection.

mod account;
mod config;
mod security;

pub use crate::service::account::{
    Account, AccountError, AccountService, AccountStore, AccountUpdate, MemoryAccountStore,
    PgAccountStore, StoreError,
};
pub use crate::service::config::{ServiceConfig, ServiceConfigBuilder};
pub use crate::service::security::{
    AuthClaims, HashingFailed, IssuedToken, MIN_SECRET_LEN, PasswordHasher, PasswordPolicy,
    PolicyViolation, SESSION_TOKEN_TTL, SessionKeys, SessionKeysConfig, SessionTokens, TokenError,
};
// Re-export error types from crate root for convenience
pub use crate::{Error, Result};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Debug, Clone)]
pub struct ServiceState {
    pub account_service: AccountService,
    pub session_tokens: SessionTokens,
}

impl ServiceState {
    /// Initializes application state from configuration.
    ///
    /// Opens the account store (connecting to Postgres and applying
    /// migrations unless the in-memory store is selected) and loads the
    /// session signing keys.
    pub async fn from_config(config: &ServiceConfig) -> Result<Self> {
        let session_keys = config.load_session_keys().await?;
        let account_store = config.create_account_store().await?;

        Ok(Self::new(
            AccountService::from_arc(account_store),
            SessionTokens::new(session_keys),
        ))
    }

    /// Assembles state from already constructed services.
    pub fn new(account_service: AccountService, session_tokens: SessionTokens) -> Self {
        Self {
            account_service,
            session_tokens,
        }
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(account_service: AccountService);
impl_di!(session_tokens: SessionTokens);
