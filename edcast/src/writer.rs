//! Script artifact files.
//!
//! An artifact is a Markdown file with a short header followed by the
//! trimmed script:
//!
//! ```text
//! # Educational Content Script: <topic>
//!
//! Generated: 2026-03-14 09:26:53
//! Word Count: 112 words (Target: ≤150 for 1-minute audio)
//!
//! Mike: ...
//! ```
//!
//! The header records both the actual count and the target so readers can
//! flag long scripts with [`ScriptArtifact::parse`] alone.

use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use tracing::info;

use crate::error::{Error, Result};
use crate::output::OutputDir;
use crate::script::{Script, TARGET_WORDS, Topic};

const TITLE_PREFIX: &str = "# Educational Content Script: ";
const GENERATED_PREFIX: &str = "Generated: ";
const WORD_COUNT_PREFIX: &str = "Word Count: ";
const TARGET_INFIX: &str = " words (Target: ≤";
const TARGET_SUFFIX: &str = " for 1-minute audio)";

/// `strftime` pattern of the `Generated:` header line.
pub const HEADER_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render the full artifact text.
#[must_use]
pub fn render_artifact(
    topic: &Topic,
    script: &Script,
    word_count: usize,
    at: DateTime<Local>,
) -> String {
    format!(
        "{TITLE_PREFIX}{topic}\n\n\
         {GENERATED_PREFIX}{}\n\
         {WORD_COUNT_PREFIX}{word_count}{TARGET_INFIX}{TARGET_WORDS}{TARGET_SUFFIX}\n\n\
         {}",
        at.format(HEADER_TIMESTAMP_FORMAT),
        script.trimmed(),
    )
}

/// Persists scripts under an [`OutputDir`].
#[derive(Debug, Clone)]
pub struct ScriptWriter {
    output: OutputDir,
}

impl ScriptWriter {
    /// Create a writer for `output`.
    #[must_use]
    pub const fn new(output: OutputDir) -> Self {
        Self { output }
    }

    /// The target directory.
    #[must_use]
    pub const fn output(&self) -> &OutputDir {
        &self.output
    }

    /// Write `script` stamped with the current local time.
    pub fn write(&self, topic: &Topic, script: &Script) -> Result<PathBuf> {
        self.write_at(topic, script, Local::now())
    }

    /// Write `script` stamped with `at`.
    ///
    /// On a write failure the partial file is removed before the error is
    /// returned.
    pub fn write_at(&self, topic: &Topic, script: &Script, at: DateTime<Local>) -> Result<PathBuf> {
        let word_count = script.word_count();
        let contents = render_artifact(topic, script, word_count, at);

        let (path, mut file) = self.output.create_unique("script", "md", at)?;
        let written = file
            .write_all(contents.as_bytes())
            .and_then(|()| file.sync_all());

        if let Err(source) = written {
            drop(file);
            let _ = std::fs::remove_file(&path);
            return Err(Error::filesystem(path, source));
        }

        info!(path = %path.display(), words = word_count, "script saved");
        Ok(path)
    }
}

/// A parsed artifact file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptArtifact {
    /// Topic from the title line.
    pub topic: String,
    /// `Generated:` timestamp text.
    pub generated: String,
    /// Recorded dialogue word count.
    pub word_count: usize,
    /// Recorded target threshold.
    pub target: usize,
    /// Script body.
    pub body: String,
}

impl ScriptArtifact {
    /// Parse artifact text. Returns `None` if the header is malformed.
    #[must_use]
    pub fn parse(contents: &str) -> Option<Self> {
        let (title, rest) = contents.split_once("\n\n")?;
        let topic = title.strip_prefix(TITLE_PREFIX)?;

        let (meta, body) = rest.split_once("\n\n").unwrap_or((rest, ""));
        let mut meta = meta.lines();
        let generated = meta.next()?.strip_prefix(GENERATED_PREFIX)?;
        let counts = meta.next()?.strip_prefix(WORD_COUNT_PREFIX)?;
        let (word_count, target) = counts.split_once(TARGET_INFIX)?;
        let target = target.strip_suffix(TARGET_SUFFIX)?;

        Some(Self {
            topic: topic.to_owned(),
            generated: generated.to_owned(),
            word_count: word_count.parse().ok()?,
            target: target.parse().ok()?,
            body: body.to_owned(),
        })
    }

    /// Whether the recorded count exceeds the recorded target.
    #[must_use]
    pub const fn is_over_target(&self) -> bool {
        self.word_count > self.target
    }
}
