#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub(crate) const MIGRATIONS: diesel_migrations::EmbeddedMigrations =
    diesel_migrations::embed_migrations!("./migrations");

pub const TRACING_TARGET_CLIENT: &str = "gotalk_postgres::client";
pub const TRACING_TARGET_QUERY: &str = "gotalk_postgres::queries";
pub const TRACING_TARGET_MIGRATION: &str = "gotalk_postgres::migrations";
pub const TRACING_TARGET_CONNECTION: &str = "gotalk_postgres::connection";

mod client;
pub mod model;
pub mod query;
mod schema;
pub mod types;

use deadpool::managed::TimeoutType;
use diesel::ConnectionError;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::pooled_connection::PoolError;
use diesel_async::pooled_connection::deadpool::PoolError as DeadpoolError;
pub use diesel_async::AsyncPgConnection as PgConnection;

pub use crate::client::{
    ConnectionPool, MigrationResult, PgClient, PgClientMigrationExt, PgConfig, PgConn,
    PooledConnection, run_pending_migrations,
};
use crate::types::AccountConstraint;

/// Boxed migration harness error.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Everything that can go wrong talking to PostgreSQL.
#[derive(Debug, thiserror::Error)]
#[must_use = "database errors should be handled appropriately"]
pub enum PgError {
    #[error("invalid database configuration: {0}")]
    Config(String),

    /// Waiting for, creating or recycling a pooled connection took too long.
    #[error("database pool timed out ({0:?})")]
    Timeout(TimeoutType),

    #[error("database connection failed: {0}")]
    Connection(#[from] ConnectionError),

    #[error("database migration failed: {0}")]
    Migration(BoxError),

    #[error("database query failed: {0}")]
    Query(#[from] DieselError),

    /// Pool misconfiguration that should never happen at runtime.
    #[error("database pool unusable: {0}")]
    Pool(String),
}

impl PgError {
    /// The constraint a failed statement violated, if PostgreSQL named one.
    pub fn constraint_name(&self) -> Option<&str> {
        match self {
            Self::Query(DieselError::DatabaseError(_, info)) => info.constraint_name(),
            _ => None,
        }
    }

    /// The violated `accounts` constraint, when it is one this crate declares.
    pub fn account_constraint(&self) -> Option<AccountConstraint> {
        self.constraint_name().and_then(AccountConstraint::from_name)
    }

    /// Whether a `UNIQUE` constraint rejected the statement.
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            Self::Query(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _))
        )
    }

    /// Whether retrying later may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout(_) | Self::Connection(_) => true,
            Self::Query(DieselError::DatabaseError(kind, _)) => {
                matches!(kind, DatabaseErrorKind::ClosedConnection)
            }
            _ => false,
        }
    }
}

impl From<DeadpoolError> for PgError {
    fn from(error: DeadpoolError) -> Self {
        match error {
            DeadpoolError::Timeout(timeout) => Self::Timeout(timeout),
            DeadpoolError::Backend(PoolError::ConnectionError(error)) => Self::Connection(error),
            DeadpoolError::Backend(PoolError::QueryError(error)) => Self::Query(error),
            DeadpoolError::Closed => Self::Pool("pool is closed".to_owned()),
            DeadpoolError::NoRuntimeSpecified => Self::Pool("no async runtime".to_owned()),
            DeadpoolError::PostCreateHook(error) => {
                tracing::warn!(
                    target: TRACING_TARGET_CONNECTION,
                    error = %error,
                    "connection setup hook failed"
                );
                Self::Pool(error.to_string())
            }
        }
    }
}

pub type PgResult<T, E = PgError> = Result<T, E>;
