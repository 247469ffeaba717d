//! Process-wide signing secret for session tokens.
//!
//! The secret is loaded once at start-up, either directly from configuration
//! or from a file, and is immutable afterwards.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[cfg(feature = "config")]
use clap::Args;
use jsonwebtoken::{DecodingKey, EncodingKey};

use crate::{Error, Result};

/// Tracing target for session key loading.
const TRACING_TARGET_SESSION_KEYS: &str = "gotalk_server::service::session_keys";

/// Minimum accepted secret length in bytes.
pub const MIN_SECRET_LEN: usize = 32;

/// Source of the HMAC secret used to sign session tokens.
///
/// Exactly one of [`jwt_secret`] and [`jwt_secret_file`] must be set.
///
/// [`jwt_secret`]: SessionKeysConfig::jwt_secret
/// [`jwt_secret_file`]: SessionKeysConfig::jwt_secret_file
#[derive(Clone, Default)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct SessionKeysConfig {
    /// Secret used to sign and verify session tokens.
    #[cfg_attr(feature = "config", arg(long, env = "JWT_SECRET", hide_env_values = true))]
    pub jwt_secret: Option<String>,

    /// File containing the secret used to sign and verify session tokens.
    #[cfg_attr(feature = "config", arg(long, env = "JWT_SECRET_FILE"))]
    pub jwt_secret_file: Option<PathBuf>,
}

impl SessionKeysConfig {
    /// Creates a configuration holding the secret inline.
    pub fn from_secret(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: Some(secret.into()),
            jwt_secret_file: None,
        }
    }

    /// Creates a configuration reading the secret from `path`.
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        Self {
            jwt_secret: None,
            jwt_secret_file: Some(path.as_ref().to_path_buf()),
        }
    }
}

impl fmt::Debug for SessionKeysConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionKeysConfig")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "[REDACTED]"))
            .field("jwt_secret_file", &self.jwt_secret_file)
            .finish()
    }
}

/// HMAC keys used for session token signing and verification.
///
/// Cheap to clone; all clones share the same key material.
#[derive(Clone)]
pub struct SessionKeys {
    inner: Arc<SessionKeysInner>,
}

struct SessionKeysInner {
    decoding_key: DecodingKey,
    encoding_key: EncodingKey,
}

impl SessionKeys {
    /// Loads the secret described by `config`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if neither or both sources are set, if
    /// the secret file cannot be read, or if the secret is shorter than
    /// [`MIN_SECRET_LEN`] bytes.
    pub async fn from_config(config: &SessionKeysConfig) -> Result<Self> {
        let secret = match (&config.jwt_secret, &config.jwt_secret_file) {
            (Some(secret), None) => secret.clone().into_bytes(),
            (None, Some(path)) => Self::load_secret_file(path).await?,
            (Some(_), Some(_)) => {
                return Err(Error::config(
                    "only one of JWT_SECRET and JWT_SECRET_FILE may be set",
                ));
            }
            (None, None) => {
                return Err(Error::config(
                    "one of JWT_SECRET or JWT_SECRET_FILE must be set",
                ));
            }
        };

        let keys = Self::new_from_secret(&secret)?;

        tracing::info!(
            target: TRACING_TARGET_SESSION_KEYS,
            from_file = config.jwt_secret_file.is_some(),
            "Session keys loaded",
        );

        Ok(keys)
    }

    /// Builds keys from raw secret bytes.
    pub fn new_from_secret(secret: &[u8]) -> Result<Self> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(Error::config(format!(
                "session secret must be at least {MIN_SECRET_LEN} bytes long"
            )));
        }

        let inner = Arc::new(SessionKeysInner {
            decoding_key: DecodingKey::from_secret(secret),
            encoding_key: EncodingKey::from_secret(secret),
        });

        Ok(Self { inner })
    }

    /// Returns a reference to the decoding key.
    #[inline]
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.inner.decoding_key
    }

    /// Returns a reference to the encoding key.
    #[inline]
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.inner.encoding_key
    }

    /// Reads the secret file, dropping trailing whitespace and newlines.
    async fn load_secret_file(path: &Path) -> Result<Vec<u8>> {
        tracing::debug!(
            target: TRACING_TARGET_SESSION_KEYS,
            path = %path.display(),
            "loading session secret from file",
        );

        let mut data = tokio::fs::read(path).await.map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET_SESSION_KEYS,
                path = %path.display(),
                error = %e,
                "failed to read session secret file",
            );
            Error::config("failed to read session secret file").with_source(e)
        })?;

        let trimmed_len = data
            .iter()
            .rposition(|b| !b.is_ascii_whitespace())
            .map_or(0, |pos| pos + 1);
        data.truncate(trimmed_len);

        Ok(data)
    }
}

impl fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionKeys").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::ErrorKind;

    const TEST_SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[tokio::test]
    async fn load_inline_secret() -> anyhow::Result<()> {
        let config = SessionKeysConfig::from_secret(TEST_SECRET);
        SessionKeys::from_config(&config).await?;
        Ok(())
    }

    #[tokio::test]
    async fn load_secret_file_with_trailing_newline() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("jwt.secret");
        fs::write(&path, format!("{TEST_SECRET}\n"))?;

        let data = SessionKeys::load_secret_file(&path).await?;
        assert_eq!(data, TEST_SECRET.as_bytes());

        SessionKeys::from_config(&SessionKeysConfig::from_file(&path)).await?;
        Ok(())
    }

    #[tokio::test]
    async fn reject_missing_file() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let config = SessionKeysConfig::from_file(temp_dir.path().join("missing"));

        let error = SessionKeys::from_config(&config).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Config);
        Ok(())
    }

    #[tokio::test]
    async fn reject_short_secret() {
        let config = SessionKeysConfig::from_secret("too-short");
        assert!(SessionKeys::from_config(&config).await.is_err());
    }

    #[tokio::test]
    async fn reject_ambiguous_or_missing_source() {
        let both = SessionKeysConfig {
            jwt_secret: Some(TEST_SECRET.to_owned()),
            jwt_secret_file: Some("./jwt.secret".into()),
        };
        assert!(SessionKeys::from_config(&both).await.is_err());

        let neither = SessionKeysConfig::default();
        assert!(SessionKeys::from_config(&neither).await.is_err());
    }

    #[test]
    fn debug_hides_secret() {
        let config = SessionKeysConfig::from_secret(TEST_SECRET);
        let debug = format!("{config:?}");
        assert!(!debug.contains(TEST_SECRET));
        assert!(debug.contains("[REDACTED]"));
    }
}
