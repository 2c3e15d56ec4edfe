//! Gemini text-to-speech client configuration.

use crate::config::SpeechSettings;
use crate::credentials::ApiKey;

/// A speaker label bound to a prebuilt Gemini voice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakerVoice {
    /// Label as it appears before the colon in the script.
    pub speaker: String,
    /// Prebuilt voice name, e.g. `Puck`.
    pub voice: String,
}

impl SpeakerVoice {
    /// Bind `speaker` to `voice`.
    #[must_use]
    pub fn new(speaker: impl Into<String>, voice: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            voice: voice.into(),
        }
    }
}

/// Configuration for the Gemini client.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication.
    pub api_key: ApiKey,
    /// Base URL for the API.
    pub base_url: String,
    /// TTS model.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Speaker voices, in prompt order.
    pub voices: Vec<SpeakerVoice>,
}

impl GeminiConfig {
    /// Default Gemini API base URL.
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com/v1beta";
    /// Default TTS model.
    pub const DEFAULT_MODEL: &'static str = "gemini-2.5-flash-preview-tts";

    /// Voices for the two dialogue speakers.
    #[must_use]
    pub fn default_voices() -> Vec<SpeakerVoice> {
        vec![
            SpeakerVoice::new("Mike", "Puck"),
            SpeakerVoice::new("Sara", "Kore"),
        ]
    }

    /// Creates a new configuration with the given API key.
    #[must_use]
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: Self::DEFAULT_BASE_URL.to_owned(),
            model: Self::DEFAULT_MODEL.to_owned(),
            timeout_secs: Some(120),
            voices: Self::default_voices(),
        }
    }

    /// Sets the base URL. A trailing slash is dropped.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_url = url.trim_end_matches('/').to_owned();
        self
    }

    /// Sets the model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Sets the speaker voices.
    #[must_use]
    pub fn with_voices(mut self, voices: Vec<SpeakerVoice>) -> Self {
        self.voices = voices;
        self
    }

    /// Apply file settings on top of this configuration.
    ///
    /// Voice overrides merge over the default speakers; see
    /// [`SpeechSettings::speakers`].
    #[must_use]
    pub fn with_settings(self, settings: &SpeechSettings) -> Self {
        let mut config = self
            .with_base_url(settings.base_url.clone())
            .with_model(settings.model.clone())
            .with_voices(settings.speakers());
        config.timeout_secs = settings.timeout();
        config
    }

    /// Speaker labels joined for the prompt, e.g. `Mike and Sara`.
    #[must_use]
    pub fn speaker_list(&self) -> String {
        self.voices
            .iter()
            .map(|v| v.speaker.as_str())
            .collect::<Vec<_>>()
            .join(" and ")
    }
}
