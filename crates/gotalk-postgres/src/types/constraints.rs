//! Constraint names declared by the migrations.

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Named constraints on the `accounts` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Display, EnumIter, EnumString, IntoStaticStr)]
pub enum AccountConstraint {
    #[strum(serialize = "accounts_username_unique")]
    UsernameUnique,
    #[strum(serialize = "accounts_username_not_empty")]
    UsernameNotEmpty,
    #[strum(serialize = "accounts_password_hash_not_empty")]
    PasswordHashNotEmpty,
    #[strum(serialize = "accounts_updated_after_created")]
    UpdatedAfterCreated,
}

impl AccountConstraint {
    /// Resolves a constraint name reported by PostgreSQL.
    ///
    /// ```
    /// use gotalk_postgres::types::AccountConstraint;
    ///
    /// assert_eq!(
    ///     AccountConstraint::from_name("accounts_username_unique"),
    ///     Some(AccountConstraint::UsernameUnique),
    /// );
    /// assert_eq!(AccountConstraint::from_name("messages_body_not_empty"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        name.parse().ok()
    }
}
