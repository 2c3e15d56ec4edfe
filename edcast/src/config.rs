//! Configuration management for edcast.
//!
//! Settings are loaded from:
//! 1. Default values
//! 2. Config file (`~/.edcast/config.toml`, or an explicit path)
//!
//! The API key is never read from the config file; see
//! [`credentials`](crate::credentials).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::synthesis::{GeminiConfig, SpeakerVoice};

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// IO error.
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        /// Config file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
    /// Invalid value.
    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Where artifacts are written.
    #[serde(default)]
    pub output: OutputSettings,

    /// Voice synthesis settings.
    #[serde(default)]
    pub speech: SpeechSettings,
}

/// Artifact output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSettings {
    /// Output directory, relative to the working directory unless absolute.
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("outputs")
}

/// Gemini text-to-speech settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpeechSettings {
    /// TTS model name.
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds. `0` disables the client-side timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Voice overrides by speaker label, applied over the default
    /// `Mike = "Puck"` and `Sara = "Kore"`. An empty voice drops the speaker.
    #[serde(default)]
    pub voices: BTreeMap<String, String>,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            voices: BTreeMap::new(),
        }
    }
}

impl SpeechSettings {
    /// The effective speakers: defaults first, overridden in place, then
    /// extra speakers in name order.
    #[must_use]
    pub fn speakers(&self) -> Vec<SpeakerVoice> {
        let mut speakers = GeminiConfig::default_voices();
        for (speaker, voice) in &self.voices {
            match speakers.iter_mut().find(|v| &v.speaker == speaker) {
                Some(existing) => existing.voice.clone_from(voice),
                None => speakers.push(SpeakerVoice::new(speaker.clone(), voice.clone())),
            }
        }
        speakers.retain(|v| !v.voice.trim().is_empty());
        speakers
    }

    /// Request timeout, `None` when disabled.
    #[must_use]
    pub const fn timeout(&self) -> Option<u64> {
        match self.timeout_secs {
            0 => None,
            secs => Some(secs),
        }
    }
}

fn default_model() -> String {
    GeminiConfig::DEFAULT_MODEL.to_owned()
}

fn default_base_url() -> String {
    GeminiConfig::DEFAULT_BASE_URL.to_owned()
}

const fn default_timeout_secs() -> u64 {
    120
}

impl Settings {
    /// Check values serde cannot check.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.speech.model.trim().is_empty() {
            return Err(ConfigError::InvalidValue("speech.model is empty".into()));
        }
        if self.speech.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue("speech.base_url is empty".into()));
        }
        // Gemini's multi-speaker mode accepts at most two speakers.
        match self.speech.speakers().len() {
            1 | 2 => Ok(()),
            n => Err(ConfigError::InvalidValue(format!(
                "speech.voices must leave 1 or 2 speakers, got {n}"
            ))),
        }
    }

    /// Parse and validate settings from TOML text.
    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        let settings: Self = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }
}

/// Get the default config directory path.
#[must_use]
pub fn default_config_dir() -> PathBuf {
    dirs_next::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".edcast")
}

/// Get the default config file path.
#[must_use]
pub fn config_path() -> PathBuf {
    default_config_dir().join("config.toml")
}

/// Load settings.
///
/// An explicit `path` must exist. Without one, the default path is used if
/// present and defaults otherwise.
pub fn load_settings(path: Option<&Path>) -> ConfigResult<Settings> {
    match path {
        Some(path) => load_settings_from(path),
        None => {
            let path = config_path();
            if path.exists() {
                load_settings_from(&path)
            } else {
                info!(path = %path.display(), "config file not found, using defaults");
                Ok(Settings::default())
            }
        }
    }
}

/// Load settings from a specific path.
pub fn load_settings_from(path: &Path) -> ConfigResult<Settings> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let settings = Settings::from_toml(&content)?;
    debug!(path = %path.display(), "loaded config file");

    Ok(settings)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use assert_fs::prelude::*;

    use super::*;

    #[test]
    fn test_default_paths() {
        let cfg_dir = default_config_dir();
        assert!(cfg_dir.ends_with(".edcast"));

        let cfg_path = config_path();
        assert!(cfg_path.ends_with("config.toml"));
    }

    #[test]
    fn empty_file_yields_defaults() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.output.dir, PathBuf::from("outputs"));
        assert_eq!(settings.speech.speakers(), GeminiConfig::default_voices());
        assert_eq!(settings.speech.timeout(), Some(120));
    }

    #[test]
    fn partial_file_overrides_fields() {
        let settings = Settings::from_toml(
            r#"
            [output]
            dir = "/tmp/edcast"

            [speech]
            model = "gemini-2.5-pro-preview-tts"

            [speech.voices]
            Mike = "Charon"
            Sara = "Aoede"
            "#,
        )
        .unwrap();

        assert_eq!(settings.output.dir, PathBuf::from("/tmp/edcast"));
        assert_eq!(settings.speech.model, "gemini-2.5-pro-preview-tts");
        assert_eq!(settings.speech.base_url, default_base_url());
        assert_eq!(settings.speech.voices["Mike"], "Charon");
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = Settings::from_toml("[output]\npath = \"x\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn single_voice_override_keeps_other_speaker() {
        let settings = Settings::from_toml("[speech.voices]\nSara = \"Aoede\"\n").unwrap();
        assert_eq!(
            settings.speech.speakers(),
            vec![
                SpeakerVoice::new("Mike", "Puck"),
                SpeakerVoice::new("Sara", "Aoede"),
            ]
        );
    }

    #[test]
    fn empty_voice_drops_speaker() {
        let settings =
            Settings::from_toml("[speech.voices]\nMike = \"\"\nNarrator = \"Fenrir\"\n").unwrap();
        assert_eq!(
            settings.speech.speakers(),
            vec![
                SpeakerVoice::new("Sara", "Kore"),
                SpeakerVoice::new("Narrator", "Fenrir"),
            ]
        );
    }

    #[test]
    fn rejects_three_speakers() {
        let err = Settings::from_toml("[speech.voices]\nAlex = \"Fenrir\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }

    #[test]
    fn rejects_no_speakers() {
        let err = Settings::from_toml("[speech.voices]\nMike = \"\"\nSara = \" \"\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }

    #[test]
    fn zero_timeout_disables_it() {
        let settings = Settings::from_toml("[speech]\ntimeout_secs = 0\n").unwrap();
        assert_eq!(settings.speech.timeout(), None);
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let dir = assert_fs::TempDir::new().unwrap();
        let err = load_settings(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn loads_from_file() {
        let dir = assert_fs::TempDir::new().unwrap();
        let file = dir.child("config.toml");
        file.write_str("[speech]\ntimeout_secs = 30\n").unwrap();

        let settings = load_settings(Some(file.path())).unwrap();
        assert_eq!(settings.speech.timeout(), Some(30));
    }
}
