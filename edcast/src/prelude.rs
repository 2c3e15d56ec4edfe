//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use edcast::prelude::*;
//! ```

pub use crate::audio::SpeechAudio;
pub use crate::config::{Settings, load_settings};
pub use crate::credentials::{ApiKey, resolve_api_key};
pub use crate::error::{Error, Result};
pub use crate::output::OutputDir;
pub use crate::pipeline::{Pipeline, PreparedScript, RunReport};
pub use crate::script::{LengthCheck, Script, TARGET_WORDS, Topic, count_words, generate};
pub use crate::synthesis::{
    Gemini, GeminiConfig, MockSynthesizer, SpeechSynthesizer, SynthesisError, SynthesisOutcome,
};
pub use crate::writer::{ScriptArtifact, ScriptWriter};
