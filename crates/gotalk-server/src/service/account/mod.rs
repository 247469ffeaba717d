//! Account registration, authentication and lifecycle.
//!
//! [`AccountService`] composes the password policy, the credential hasher and
//! an [`AccountStore`]. Two stores are provided: [`PgAccountStore`] backed by
//! PostgreSQL and [`MemoryAccountStore`] for tests and local runs.

mod account;
mod memory_store;
mod pg_store;
mod service;
mod store;

pub use account::Account;
pub use memory_store::MemoryAccountStore;
pub use pg_store::PgAccountStore;
pub use service::{AccountError, AccountService, AccountUpdate};
pub use store::{AccountStore, StoreError};

/// Tracing target for account operations.
pub(crate) const TRACING_TARGET_ACCOUNT: &str = "gotalk_server::service::account";
