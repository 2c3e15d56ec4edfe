//! Single-attempt synthesis with a structured outcome.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Local;
use tracing::{info, warn};

use super::SpeechSynthesizer;
use crate::audio::SpeechAudio;
use crate::error::{Error, Result};
use crate::output::OutputDir;
use crate::script::Script;

/// Result of one synthesis attempt. There is no third state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisOutcome {
    /// Audio was produced and saved.
    Succeeded {
        /// The WAV file.
        audio_path: PathBuf,
        /// Playback length.
        duration: Duration,
    },
    /// Nothing usable was saved.
    Failed {
        /// Human-readable reason.
        diagnostic: String,
    },
}

impl SynthesisOutcome {
    /// Whether audio was saved.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    /// The saved file, on success.
    #[must_use]
    pub fn audio_path(&self) -> Option<&Path> {
        match self {
            Self::Succeeded { audio_path, .. } => Some(audio_path),
            Self::Failed { .. } => None,
        }
    }

    /// The failure reason, on failure.
    #[must_use]
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            Self::Succeeded { .. } => None,
            Self::Failed { diagnostic } => Some(diagnostic),
        }
    }
}

/// Speak `script` once and save the audio under `output`.
///
/// The trimmed script text is sent. Errors from the synthesizer and from
/// saving are folded into [`SynthesisOutcome::Failed`]; this function never
/// retries.
pub async fn invoke<S>(synthesizer: &S, output: &OutputDir, script: &Script) -> SynthesisOutcome
where
    S: SpeechSynthesizer + ?Sized,
{
    let audio = match synthesizer.synthesize(script.trimmed()).await {
        Ok(audio) if audio.is_empty() => {
            return failed(format!("{} returned no audio samples", synthesizer.name()));
        }
        Ok(audio) => audio,
        Err(e) => {
            let hint = if e.is_transient() { " (temporary, try again later)" } else { "" };
            return failed(format!("{} synthesis failed: {e}{hint}", synthesizer.name()));
        }
    };

    match save_wav(&audio, output) {
        Ok(audio_path) => {
            let duration = audio.duration();
            info!(path = %audio_path.display(), secs = duration.as_secs_f64(), "audio saved");
            SynthesisOutcome::Succeeded {
                audio_path,
                duration,
            }
        }
        Err(e) => failed(format!("could not save audio: {e}")),
    }
}

fn failed(diagnostic: String) -> SynthesisOutcome {
    warn!(%diagnostic, "synthesis failed");
    SynthesisOutcome::Failed { diagnostic }
}

fn save_wav(audio: &SpeechAudio, output: &OutputDir) -> Result<PathBuf> {
    let (path, file) = output.create_unique("audio", "wav", Local::now())?;

    if let Err(e) = write_and_sync(audio, file) {
        let _ = std::fs::remove_file(&path);
        return Err(Error::filesystem(path, e));
    }
    Ok(path)
}

fn write_and_sync(audio: &SpeechAudio, file: File) -> std::io::Result<()> {
    let mut writer = BufWriter::new(file);
    audio.write_wav(&mut writer).map_err(|e| match e {
        hound::Error::IoError(io) => io,
        other => std::io::Error::other(other),
    })?;
    writer.into_inner().map_err(|e| e.into_error())?.sync_all()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::synthesis::{MockSynthesizer, SynthesisError};

    #[tokio::test]
    async fn success_writes_wav() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let output = OutputDir::new(tmp.path().join("out"));
        let synth = MockSynthesizer::succeeding();

        let outcome = invoke(&synth, &output, &Script::new("\n  Mike: Hi\nSara: Hey  \n")).await;

        assert!(outcome.is_success());
        let path = outcome.audio_path().unwrap();
        assert!(path.is_file());
        assert_eq!(path.extension().unwrap(), "wav");
        assert!(path.file_name().unwrap().to_str().unwrap().starts_with("audio-"));
        assert_eq!(synth.last_input().as_deref(), Some("Mike: Hi\nSara: Hey"));

        let reader = hound::WavReader::open(path).unwrap();
        assert_eq!(reader.spec().channels, 1);
        assert_eq!(reader.duration(), 24_000);
        assert!(matches!(
            outcome,
            SynthesisOutcome::Succeeded { duration, .. } if duration == Duration::from_secs(1)
        ));
    }

    #[tokio::test]
    async fn provider_error_becomes_failed() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let output = OutputDir::new(tmp.path());
        let synth = MockSynthesizer::failing(SynthesisError::auth("mock", "API key not valid"));

        let outcome = invoke(&synth, &output, &Script::new("Mike: hi")).await;

        assert!(!outcome.is_success());
        assert!(outcome.diagnostic().unwrap().contains("API key not valid"));
        assert_eq!(synth.calls(), 1);
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn empty_audio_is_failure() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let synth = MockSynthesizer::new(Ok(SpeechAudio::new(Vec::new(), 24_000)));

        let outcome = invoke(&synth, &OutputDir::new(tmp.path()), &Script::new("Mike: hi")).await;

        assert!(outcome.diagnostic().unwrap().contains("no audio"));
    }

    #[tokio::test]
    async fn unwritable_output_is_failure() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, "file").unwrap();
        let synth = MockSynthesizer::succeeding();

        let outcome = invoke(&synth, &OutputDir::new(&blocker), &Script::new("Mike: hi")).await;

        assert!(outcome.diagnostic().unwrap().starts_with("could not save audio"));
    }

    #[tokio::test]
    async fn transient_error_gets_hint() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let synth = MockSynthesizer::failing(SynthesisError::rate_limited("mock", "quota"));

        let outcome = invoke(&synth, &OutputDir::new(tmp.path()), &Script::new("Mike: hi")).await;

        assert!(outcome.diagnostic().unwrap().contains("try again later"));
    }
}
