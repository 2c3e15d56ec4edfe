//! Gemini text-to-speech client.
//!
//! Speech is requested through `models/{model}:generateContent` with the
//! `AUDIO` response modality. Gemini answers with base64-encoded 16-bit PCM in
//! an `inlineData` part.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::audio::{DEFAULT_SAMPLE_RATE, SpeechAudio, sample_rate_from_mime};
use crate::error::Result;

use super::config::{GeminiConfig, SpeakerVoice};
use super::{SpeechSynthesizer, SynthesisError};

const PROVIDER: &str = "gemini";

/// `generateContent` request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
struct RequestContent {
    parts: Vec<TextPart>,
}

#[derive(Debug, Clone, Serialize)]
struct TextPart {
    text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<String>,
    speech_config: SpeechConfig,
}

/// Exactly one of the two fields is set.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    voice_config: Option<VoiceConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    multi_speaker_voice_config: Option<MultiSpeakerVoiceConfig>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct MultiSpeakerVoiceConfig {
    speaker_voice_configs: Vec<SpeakerVoiceConfig>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeakerVoiceConfig {
    speaker: String,
    voice_config: VoiceConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceConfig {
    prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct PrebuiltVoiceConfig {
    voice_name: String,
}

impl VoiceConfig {
    fn prebuilt(name: &str) -> Self {
        Self {
            prebuilt_voice_config: PrebuiltVoiceConfig {
                voice_name: name.to_owned(),
            },
        }
    }
}

/// `generateContent` response body, reduced to what speech needs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    #[serde(default)]
    inline_data: Option<InlineData>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default)]
    mime_type: String,
    #[serde(default)]
    data: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

/// Google API error response.
#[derive(Debug, Clone, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiError,
}

#[derive(Debug, Clone, Deserialize)]
struct GeminiError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Gemini API client.
#[derive(Debug, Clone)]
pub struct Gemini {
    config: Arc<GeminiConfig>,
    client: Client,
}

impl Gemini {
    /// Create a new Gemini client with the given configuration.
    pub fn new(config: GeminiConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(SynthesisError::auth(PROVIDER, "API key is required").into());
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(timeout));
        }

        let client = builder
            .build()
            .map_err(|e| SynthesisError::internal(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }

    /// Get the model.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Build the `generateContent` URL.
    pub(crate) fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    /// Build a JSON POST with the API key header.
    pub(crate) fn build_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .post(url)
            .header("x-goog-api-key", self.config.api_key.expose())
            .header("Content-Type", "application/json")
    }

    fn prompt(&self, script: &str) -> String {
        format!(
            "TTS the following conversation between {}:\n{script}",
            self.config.speaker_list()
        )
    }

    fn build_body(&self, script: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![TextPart {
                    text: self.prompt(script),
                }],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["AUDIO".to_owned()],
                speech_config: speech_config(&self.config.voices),
            },
        }
    }

    /// Map a non-success response to an error.
    pub(crate) fn parse_error(status: u16, body: &str) -> SynthesisError {
        let Ok(parsed) = serde_json::from_str::<GeminiErrorResponse>(body) else {
            return SynthesisError::http_status(status, body);
        };
        let GeminiError { message, status: code } = parsed.error;

        match (status, code.as_deref()) {
            (401 | 403, _) | (_, Some("UNAUTHENTICATED" | "PERMISSION_DENIED")) => {
                SynthesisError::auth(PROVIDER, message)
            }
            (429, _) | (_, Some("RESOURCE_EXHAUSTED")) => {
                SynthesisError::rate_limited(PROVIDER, message)
            }
            (_, Some(code)) => SynthesisError::provider_code(PROVIDER, code, message),
            (_, None) => SynthesisError::provider(PROVIDER, message),
        }
    }
}

fn speech_config(voices: &[SpeakerVoice]) -> SpeechConfig {
    match voices {
        [single] => SpeechConfig {
            voice_config: Some(VoiceConfig::prebuilt(&single.voice)),
            multi_speaker_voice_config: None,
        },
        _ => SpeechConfig {
            voice_config: None,
            multi_speaker_voice_config: Some(MultiSpeakerVoiceConfig {
                speaker_voice_configs: voices
                    .iter()
                    .map(|v| SpeakerVoiceConfig {
                        speaker: v.speaker.clone(),
                        voice_config: VoiceConfig::prebuilt(&v.voice),
                    })
                    .collect(),
            }),
        },
    }
}

/// Decode the first non-empty inline audio part.
fn extract_audio(response: &GenerateContentResponse) -> std::result::Result<SpeechAudio, SynthesisError> {
    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.as_deref())
    {
        return Err(SynthesisError::provider_code(
            PROVIDER,
            reason,
            "prompt was blocked",
        ));
    }

    let inline = response
        .candidates
        .iter()
        .filter_map(|c| c.content.as_ref())
        .flat_map(|c| &c.parts)
        .filter_map(|p| p.inline_data.as_ref())
        .find(|d| !d.data.is_empty());

    let Some(inline) = inline else {
        return Err(SynthesisError::empty_audio(describe_missing_audio(response)));
    };

    let bytes = BASE64
        .decode(inline.data.as_bytes())
        .map_err(|e| SynthesisError::response_format("base64 audio data", e.to_string()))?;
    let rate = sample_rate_from_mime(&inline.mime_type).unwrap_or(DEFAULT_SAMPLE_RATE);
    let audio = SpeechAudio::from_pcm16_le(&bytes, rate)?;

    if audio.is_empty() {
        return Err(SynthesisError::empty_audio("inline audio decoded to zero samples"));
    }

    debug!(
        mime = %inline.mime_type,
        samples = audio.samples().len(),
        sample_rate = rate,
        "decoded speech audio"
    );
    Ok(audio)
}

fn describe_missing_audio(response: &GenerateContentResponse) -> String {
    let Some(candidate) = response.candidates.first() else {
        return "response has no candidates".to_owned();
    };

    let text = candidate
        .content
        .as_ref()
        .and_then(|c| c.parts.iter().find_map(|p| p.text.as_deref()));

    match (candidate.finish_reason.as_deref(), text) {
        (_, Some(text)) => format!("model returned text instead of audio: {text}"),
        (Some(reason), None) => format!("finish reason {reason}"),
        (None, None) => "candidate has no inline data".to_owned(),
    }
}

#[async_trait]
impl SpeechSynthesizer for Gemini {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn synthesize(&self, script: &str) -> std::result::Result<SpeechAudio, SynthesisError> {
        let url = self.generate_url();
        let body = self.build_body(script);
        debug!(model = %self.config.model, chars = script.len(), "sending speech request");

        let response = self
            .build_request(&url)
            .json(&body)
            .send()
            .await
            .map_err(SynthesisError::from)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Self::parse_error(status.as_u16(), &error_text));
        }

        let parsed: GenerateContentResponse =
            response.json().await.map_err(SynthesisError::from)?;
        extract_audio(&parsed)
    }
}
