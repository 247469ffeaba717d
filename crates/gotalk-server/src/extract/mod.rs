//! Request extractors with consistent error responses.
//!
//! - [`AuthHeader`]: bearer token from the `Authorization` header
//! - [`AuthState`]: account identifier recovered from a verified token
//! - [`Json`]: JSON body with `bad_request` rejections
//! - [`ValidateJson`]: JSON body checked with [`validator`]

pub mod auth;
pub mod reject;

pub use crate::TRACING_TARGET_AUTHENTICATION;
pub use crate::extract::auth::{AuthHeader, AuthState};
pub use crate::extract::reject::{Json, ValidateJson};
