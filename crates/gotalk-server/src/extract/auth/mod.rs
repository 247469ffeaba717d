//! Bearer token extraction and verification.

mod auth_header;
mod auth_state;

pub use auth_header::AuthHeader;
pub use auth_state::AuthState;
