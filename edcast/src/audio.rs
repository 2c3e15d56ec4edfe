//! Synthesized speech and WAV encoding.
//!
//! Gemini returns raw 16-bit little-endian mono PCM. [`SpeechAudio`] holds the
//! decoded samples and writes them as a WAV file via `hound`.

use std::io::{Seek, Write};
use std::time::Duration;

use crate::synthesis::SynthesisError;

/// Sample rate assumed when the response MIME type does not carry one.
pub const DEFAULT_SAMPLE_RATE: u32 = 24_000;

/// Decoded mono speech.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechAudio {
    samples: Vec<i16>,
    sample_rate: u32,
}

impl SpeechAudio {
    /// Wrap decoded samples.
    #[must_use]
    pub const fn new(samples: Vec<i16>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Decode 16-bit little-endian PCM.
    pub fn from_pcm16_le(bytes: &[u8], sample_rate: u32) -> Result<Self, SynthesisError> {
        if bytes.len() % 2 != 0 {
            return Err(SynthesisError::response_format(
                "16-bit PCM (even byte count)",
                format!("{} bytes", bytes.len()),
            ));
        }

        let samples = bytes
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect();

        Ok(Self::new(samples, sample_rate))
    }

    /// The samples.
    #[must_use]
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Samples per second.
    #[must_use]
    pub const fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Whether there is no audio at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Playback length.
    #[must_use]
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        let secs = self.samples.len() as f64 / f64::from(self.sample_rate);
        Duration::from_secs_f64(secs)
    }

    /// Encode as a 16-bit mono WAV stream.
    pub fn write_wav<W: Write + Seek>(&self, writer: W) -> hound::Result<()> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut wav = hound::WavWriter::new(writer, spec)?;
        for &sample in &self.samples {
            wav.write_sample(sample)?;
        }
        wav.finalize()
    }
}

/// Extract the `rate=` parameter from a MIME type such as
/// `audio/L16;codec=pcm;rate=24000`.
#[must_use]
pub fn sample_rate_from_mime(mime: &str) -> Option<u32> {
    mime.split(';')
        .filter_map(|param| param.trim().split_once('='))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("rate"))
        .and_then(|(_, value)| value.trim().parse().ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn decodes_little_endian_pairs() {
        let audio = SpeechAudio::from_pcm16_le(&[0x01, 0x00, 0xff, 0xff, 0x00, 0x80], 8000).unwrap();
        assert_eq!(audio.samples(), &[1, -1, i16::MIN]);
        assert_eq!(audio.sample_rate(), 8000);
    }

    #[test]
    fn odd_byte_count_is_format_error() {
        let err = SpeechAudio::from_pcm16_le(&[0, 1, 2], DEFAULT_SAMPLE_RATE).unwrap_err();
        assert!(matches!(err, SynthesisError::ResponseFormat { .. }));
    }

    #[test]
    fn duration_from_sample_count() {
        let audio = SpeechAudio::new(vec![0; 48_000], 24_000);
        assert_eq!(audio.duration(), Duration::from_secs(2));
        assert_eq!(SpeechAudio::new(vec![0; 10], 0).duration(), Duration::ZERO);
        assert!(SpeechAudio::new(Vec::new(), 24_000).is_empty());
    }

    #[test]
    fn wav_round_trips_through_hound() {
        let audio = SpeechAudio::new(vec![0, 100, -100, i16::MAX], 24_000);
        let mut buf = Cursor::new(Vec::new());
        audio.write_wav(&mut buf).unwrap();

        buf.set_position(0);
        let mut reader = hound::WavReader::new(buf).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 24_000);
        assert_eq!(spec.bits_per_sample, 16);

        let samples: Vec<i16> = reader.samples::<i16>().map(Result::unwrap).collect();
        assert_eq!(samples, audio.samples());
    }

    #[test]
    fn parses_rate_from_mime() {
        assert_eq!(sample_rate_from_mime("audio/L16;codec=pcm;rate=24000"), Some(24_000));
        assert_eq!(sample_rate_from_mime("audio/L16; rate=16000"), Some(16_000));
        assert_eq!(sample_rate_from_mime("audio/L16;codec=pcm"), None);
        assert_eq!(sample_rate_from_mime("audio/L16;rate=fast"), None);
    }
}
