//! Mock synthesizer for testing.
//!
//! Returns a fixed result and records what it was asked to speak, so pipeline
//! behaviour can be checked without network access.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{SpeechSynthesizer, SynthesisError};
use crate::audio::{DEFAULT_SAMPLE_RATE, SpeechAudio};

/// A synthesizer that never touches the network.
///
/// # Example
///
/// ```rust,ignore
/// let synth = MockSynthesizer::succeeding();
/// let outcome = invoke(&synth, &output, &script).await;
/// assert_eq!(synth.calls(), 1);
/// ```
#[derive(Debug)]
pub struct MockSynthesizer {
    result: Result<SpeechAudio, SynthesisError>,
    calls: AtomicUsize,
    last_input: Mutex<Option<String>>,
}

impl MockSynthesizer {
    /// Always return `result`.
    #[must_use]
    pub const fn new(result: Result<SpeechAudio, SynthesisError>) -> Self {
        Self {
            result,
            calls: AtomicUsize::new(0),
            last_input: Mutex::new(None),
        }
    }

    /// Always return one second of silence.
    #[must_use]
    pub fn succeeding() -> Self {
        let samples = usize::try_from(DEFAULT_SAMPLE_RATE).unwrap_or(0);
        Self::new(Ok(SpeechAudio::new(vec![0; samples], DEFAULT_SAMPLE_RATE)))
    }

    /// Always fail with `error`.
    #[must_use]
    pub const fn failing(error: SynthesisError) -> Self {
        Self::new(Err(error))
    }

    /// Number of `synthesize` calls so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Text passed to the most recent call.
    #[must_use]
    pub fn last_input(&self) -> Option<String> {
        self.last_input.lock().ok().and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSynthesizer {
    fn name(&self) -> &str {
        "mock"
    }

    async fn synthesize(&self, script: &str) -> Result<SpeechAudio, SynthesisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_input.lock() {
            *last = Some(script.to_owned());
        }
        self.result.clone()
    }
}
