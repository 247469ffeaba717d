//! Credential and session-token primitives.

mod password_hasher;
mod password_policy;
mod session_keys;
mod session_tokens;

pub use password_hasher::{HashingFailed, PasswordHasher};
pub use password_policy::{PasswordPolicy, PolicyViolation};
pub use session_keys::{MIN_SECRET_LEN, SessionKeys, SessionKeysConfig};
pub use session_tokens::{
    AuthClaims, IssuedToken, SESSION_TOKEN_TTL, SessionTokens, TokenError,
};
