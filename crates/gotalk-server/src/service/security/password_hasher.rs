//! Password hashing and verification using Argon2id.
//!
//! Hashes are produced with the default Argon2id parameters (`m=19456`,
//! `t=2`, `p=1`) and stored as PHC strings, which embed the algorithm, cost
//! and salt alongside the digest.

use argon2::password_hash::{Error as ArgonError, try_generate_salt};
use argon2::{Argon2, PasswordHash, PasswordHasher as _, PasswordVerifier};

/// Tracing target for password hashing.
const TRACING_TARGET_PASSWORD_HASHER: &str = "gotalk_server::service::password_hasher";

/// Hashing could not produce a credential.
///
/// Only raised on internal failures such as salt entropy being unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("password hashing failed")]
pub struct HashingFailed;

/// Salted, adaptive one-way password hasher.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Creates a new instance of the [`PasswordHasher`] service.
    pub fn new() -> Self {
        let argon2 = Argon2::default();
        Self { argon2 }
    }

    /// Hashes a password with a fresh random salt.
    ///
    /// The returned PHC string can be stored as is. Two hashes of the same
    /// password never compare equal.
    ///
    /// # Errors
    ///
    /// Returns [`HashingFailed`] if salt generation or the hashing operation
    /// fails. An empty or weakened hash is never returned.
    pub fn hash_password(&self, password: &str) -> Result<String, HashingFailed> {
        let salt = try_generate_salt().map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET_PASSWORD_HASHER,
                error = %e,
                "failed to generate cryptographically secure salt"
            );
            HashingFailed
        })?;

        let password_hash = self
            .argon2
            .hash_password_with_salt(password.as_bytes(), &salt)
            .map_err(|e| {
                tracing::error!(
                    target: TRACING_TARGET_PASSWORD_HASHER,
                    error = %e,
                    "password hashing operation failed"
                );
                HashingFailed
            })?;

        Ok(password_hash.to_string())
    }

    /// Verifies a password against a stored PHC hash.
    ///
    /// Returns `false` on a mismatch and when the stored hash cannot be parsed.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(stored_hash) {
            Ok(parsed_hash) => parsed_hash,
            Err(e) => {
                tracing::warn!(
                    target: TRACING_TARGET_PASSWORD_HASHER,
                    error = %e,
                    "invalid password hash format"
                );
                return false;
            }
        };

        match self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
        {
            Ok(()) => true,
            Err(ArgonError::PasswordInvalid) => {
                tracing::debug!(
                    target: TRACING_TARGET_PASSWORD_HASHER,
                    "password verification failed: incorrect password"
                );
                false
            }
            Err(e) => {
                tracing::error!(
                    target: TRACING_TARGET_PASSWORD_HASHER,
                    error = %e,
                    "password verification error"
                );
                false
            }
        }
    }

    /// Performs a throwaway verification against a freshly generated hash.
    ///
    /// Used when an account does not exist so that the lookup costs as much
    /// as checking a wrong password. Always returns `false`.
    pub fn verify_dummy_password(&self, password: &str) -> bool {
        use rand::RngExt;

        let password_len = rand::random_range(16..32);
        let dummy_password: String = (0..password_len)
            .map(|_| rand::rng().sample(rand::distr::Alphanumeric) as char)
            .collect();

        if let Ok(dummy_hash) = self.hash_password(&dummy_password) {
            let _ = self.verify_password(password, &dummy_hash);
        }

        false
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_password() -> anyhow::Result<()> {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash_password("Str0ngPass!")?;

        assert!(hasher.verify_password("Str0ngPass!", &hash));
        assert!(!hasher.verify_password("Str0ngPass?", &hash));

        Ok(())
    }

    #[test]
    fn hash_uses_documented_parameters() -> anyhow::Result<()> {
        let hash = PasswordHasher::new().hash_password("Str0ngPass!")?;
        assert!(hash.starts_with("$argon2id$v=19$m=19456,t=2,p=1$"));
        Ok(())
    }

    #[test]
    fn hash_produces_unique_salts() -> anyhow::Result<()> {
        let hasher = PasswordHasher::new();

        let hash1 = hasher.hash_password("Str0ngPass!")?;
        let hash2 = hasher.hash_password("Str0ngPass!")?;

        assert_ne!(hash1, hash2);
        assert!(hasher.verify_password("Str0ngPass!", &hash1));
        assert!(hasher.verify_password("Str0ngPass!", &hash2));

        Ok(())
    }

    #[test]
    fn unparseable_hash_does_not_verify() {
        let hasher = PasswordHasher::new();
        assert!(!hasher.verify_password("Str0ngPass!", "invalid_hash_format"));
        assert!(!hasher.verify_password("Str0ngPass!", ""));
    }

    #[test]
    fn dummy_verification_never_succeeds() {
        let hasher = PasswordHasher::new();
        assert!(!hasher.verify_dummy_password("Str0ngPass!"));
        assert!(!hasher.verify_dummy_password(""));
    }
}
