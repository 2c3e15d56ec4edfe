//! API key resolution and `.env` handling.
//!
//! The key is resolved exactly once at process start and then travels inside
//! [`GeminiConfig`](crate::synthesis::GeminiConfig). Nothing else in the
//! crate reads the process environment.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

/// Environment variables holding the API key, in priority order.
pub const API_KEY_VARS: &[&str] = &["GEMINI_API_KEY", "GOOGLE_API_KEY"];

/// Placeholder value written by [`write_env_template`].
pub const PLACEHOLDER_KEY: &str = "your_actual_api_key_here";

/// Contents of a freshly created `.env` file.
pub const ENV_TEMPLATE: &str = "\
# Gemini API Configuration
# Get your API key from: https://aistudio.google.com/
GEMINI_API_KEY=your_actual_api_key_here

# Alternative: You can also use GOOGLE_API_KEY
# GOOGLE_API_KEY=your_actual_api_key_here
";

/// An API key. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a raw key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw key, for building request headers.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Number of characters in the key.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    /// Whether the key is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&"<redacted>").finish()
    }
}

/// Load `.env` from the working directory (or a parent) if there is one.
///
/// Returns the path that was loaded. A missing file is not an error.
pub fn load_dotenv() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => {
            debug!(path = %path.display(), "loaded .env file");
            Some(path)
        }
        Err(e) => {
            debug!(error = %e, "no .env file loaded");
            None
        }
    }
}

/// Resolve the API key through `lookup`, checking [`API_KEY_VARS`] in order.
///
/// Empty values and the template placeholder count as unset.
pub fn resolve_api_key<F>(lookup: F) -> Result<ApiKey>
where
    F: Fn(&str) -> Option<String>,
{
    API_KEY_VARS
        .iter()
        .find_map(|name| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| is_usable_key(value))
                .inspect(|_| debug!(variable = name, "using API key"))
        })
        .map(ApiKey)
        .ok_or(Error::MissingCredential {
            variables: API_KEY_VARS,
        })
}

/// Resolve the API key from the process environment.
pub fn api_key_from_env() -> Result<ApiKey> {
    resolve_api_key(|name| std::env::var(name).ok())
}

fn is_usable_key(value: &str) -> bool {
    !value.is_empty() && value != PLACEHOLDER_KEY
}

/// State of a `.env` file with respect to the API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvFileStatus {
    /// No file at the path.
    Missing,
    /// The file exists but has no key assignment, or only the placeholder.
    NoKey,
    /// The file assigns a real-looking key.
    HasKey,
}

/// Inspect a `.env` file without loading it into the environment.
pub fn inspect_env_file(path: &Path) -> Result<EnvFileStatus> {
    if !path.exists() {
        return Ok(EnvFileStatus::Missing);
    }

    let content = std::fs::read_to_string(path).map_err(|e| Error::filesystem(path, e))?;
    let has_key = content.lines().any(|line| {
        line.trim()
            .split_once('=')
            .is_some_and(|(name, value)| {
                API_KEY_VARS.contains(&name.trim())
                    && is_usable_key(value.trim().trim_matches(['"', '\'']))
            })
    });

    Ok(if has_key {
        EnvFileStatus::HasKey
    } else {
        EnvFileStatus::NoKey
    })
}

/// Write [`ENV_TEMPLATE`] to `path`.
///
/// Returns `false` without touching the file when it already exists and
/// `force` is not set.
pub fn write_env_template(path: &Path, force: bool) -> Result<bool> {
    let mut options = OpenOptions::new();
    options.write(true);
    if force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }

    let mut file = match options.open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(Error::filesystem(path, e)),
    };

    file.write_all(ENV_TEMPLATE.as_bytes())
        .map_err(|e| Error::filesystem(path, e))?;
    debug!(path = %path.display(), "wrote .env template");

    Ok(true)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use assert_fs::prelude::*;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn prefers_gemini_key() {
        let key = resolve_api_key(lookup(&[
            ("GEMINI_API_KEY", "gemini"),
            ("GOOGLE_API_KEY", "google"),
        ]))
        .unwrap();
        assert_eq!(key.expose(), "gemini");
    }

    #[test]
    fn falls_back_to_google_key() {
        let key = resolve_api_key(lookup(&[("GOOGLE_API_KEY", "google")])).unwrap();
        assert_eq!(key.expose(), "google");
    }

    #[test]
    fn empty_and_placeholder_values_are_unset() {
        let key = resolve_api_key(lookup(&[
            ("GEMINI_API_KEY", "  "),
            ("GOOGLE_API_KEY", PLACEHOLDER_KEY),
        ]));
        assert!(key.unwrap_err().is_missing_credential());
    }

    #[test]
    fn missing_both_is_missing_credential() {
        let err = resolve_api_key(lookup(&[])).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingCredential { variables } if variables == API_KEY_VARS
        ));
    }

    #[test]
    fn debug_redacts_key() {
        let key = ApiKey::new("super-secret");
        let shown = format!("{key:?}");
        assert!(!shown.contains("super-secret"));
        assert_eq!(key.len(), 12);
    }

    #[test]
    fn template_is_created_once() {
        let dir = assert_fs::TempDir::new().unwrap();
        let env = dir.child(".env");

        assert!(write_env_template(env.path(), false).unwrap());
        env.assert(ENV_TEMPLATE);

        env.write_str("GEMINI_API_KEY=real\n").unwrap();
        assert!(!write_env_template(env.path(), false).unwrap());
        env.assert("GEMINI_API_KEY=real\n");

        assert!(write_env_template(env.path(), true).unwrap());
        env.assert(ENV_TEMPLATE);
    }

    #[test]
    fn inspects_env_file_contents() {
        let dir = assert_fs::TempDir::new().unwrap();
        let env = dir.child(".env");

        assert_eq!(inspect_env_file(env.path()).unwrap(), EnvFileStatus::Missing);

        env.write_str(ENV_TEMPLATE).unwrap();
        assert_eq!(inspect_env_file(env.path()).unwrap(), EnvFileStatus::NoKey);

        env.write_str("GOOGLE_API_KEY=\"abc123\"\n").unwrap();
        assert_eq!(inspect_env_file(env.path()).unwrap(), EnvFileStatus::HasKey);
    }
}
