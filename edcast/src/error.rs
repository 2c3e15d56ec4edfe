//! Unified error types for edcast.
//!
//! [`Error`] covers the three ways a run can stop: a missing credential,
//! a filesystem failure while persisting artifacts, and an external
//! synthesis failure. Configuration problems are reported through
//! [`ConfigError`](crate::config::ConfigError).

use std::path::PathBuf;

use crate::config::ConfigError;
use crate::synthesis::SynthesisError;

/// Result type alias for edcast operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for edcast.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// No usable API key was found in the environment or `.env`.
    #[error("no API key found: set {}", .variables.join(" or "))]
    MissingCredential {
        /// Environment variables that were checked, in priority order.
        variables: &'static [&'static str],
    },

    /// An output directory or artifact file could not be created or written.
    #[error("cannot write {}: {source}", .path.display())]
    Filesystem {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// I/O error not tied to a specific artifact (e.g. reading stdin).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Voice synthesis error.
    #[error("synthesis error: {0}")]
    Synthesis(#[from] SynthesisError),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

impl Error {
    /// Create a filesystem error for the given path.
    #[must_use]
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Whether this error is a missing-credential precondition failure.
    #[must_use]
    pub const fn is_missing_credential(&self) -> bool {
        matches!(self, Self::MissingCredential { .. })
    }
}
