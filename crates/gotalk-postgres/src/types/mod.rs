//! Database constraint types.

mod constraints;

pub use constraints::AccountConstraint;
