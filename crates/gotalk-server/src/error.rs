//! Start-up and wiring failures.
//!
//! Anything that goes wrong while building [`ServiceState`] ends up here:
//! bad configuration, an unreachable database, an unusable signing key.
//! Failures while serving a request use [`handler::Error`].
//!
//! [`ServiceState`]: crate::service::ServiceState
//! [`handler::Error`]: crate::handler::Error

use std::borrow::Cow;
use std::error::Error as StdError;

/// Boxed error that can cross task boundaries.
pub type BoxedError = Box<dyn StdError + Send + Sync>;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Missing, conflicting or out-of-range settings.
    Config,
    /// A backing system such as Postgres or the filesystem failed.
    External,
}

#[derive(Debug, thiserror::Error)]
#[error("{kind} error: {message}")]
pub struct Error {
    kind: ErrorKind,
    message: Cow<'static, str>,
    #[source]
    source: Option<BoxedError>,
}

impl Error {
    pub fn config(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind: ErrorKind::Config,
            message: message.into(),
            source: None,
        }
    }

    /// `system` prefixes the message, e.g. `postgres: ...`.
    pub fn external(system: &str, message: impl AsRef<str>) -> Self {
        Self {
            kind: ErrorKind::External,
            message: format!("{system}: {}", message.as_ref()).into(),
            source: None,
        }
    }

    pub fn with_source(self, source: impl StdError + Send + Sync + 'static) -> Self {
        Self {
            source: Some(Box::new(source)),
            ..self
        }
    }

    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let error = Error::config("JWT_SECRET is not set");
        assert_eq!(error.kind(), ErrorKind::Config);
        assert_eq!(error.message(), "JWT_SECRET is not set");
        assert_eq!(error.to_string(), "config error: JWT_SECRET is not set");
    }

    #[test]
    fn external_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let error = Error::external("filesystem", "cannot read secret").with_source(io);

        assert_eq!(error.kind(), ErrorKind::External);
        assert_eq!(error.message(), "filesystem: cannot read secret");
        assert!(StdError::source(&error).is_some());
    }

    #[test]
    fn kind_names_are_snake_case() {
        let name: &'static str = ErrorKind::External.into();
        assert_eq!(name, "external");
        assert_eq!(ErrorKind::Config.to_string(), "config");
    }
}
