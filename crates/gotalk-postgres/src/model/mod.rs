//! Diesel models for the database tables.

mod account;

pub use account::{Account, NewAccount, UpdateAccount};
