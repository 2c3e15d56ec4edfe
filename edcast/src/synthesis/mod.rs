//! Speech synthesis.
//!
//! [`SpeechSynthesizer`] is the seam to the external voice service. The
//! production implementation is [`Gemini`]; tests use [`MockSynthesizer`].
//! [`invoke`] makes exactly one call and reduces everything that can go wrong
//! to a [`SynthesisOutcome`].

mod config;
mod error;
mod gemini;
mod invoker;
mod mock;

use async_trait::async_trait;

use crate::audio::SpeechAudio;

pub use config::{GeminiConfig, SpeakerVoice};
pub use error::SynthesisError;
pub use gemini::Gemini;
pub use invoker::{SynthesisOutcome, invoke};
pub use mock::MockSynthesizer;

/// Turns dialogue text into speech.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Short provider name for logs and diagnostics.
    fn name(&self) -> &str;

    /// Synthesize `script` in a single request.
    async fn synthesize(&self, script: &str) -> Result<SpeechAudio, SynthesisError>;
}
