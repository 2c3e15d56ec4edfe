//! Topics, scripts and their length rules.
//!
//! A [`Script`] is immutable dialogue text. Its word count is always derived
//! on demand through [`count_words`], never cached.

mod template;
mod word_count;

use std::fmt;

pub use template::{AuthoredDialogue, DialogueSource, Speaker, authored_dialogues, generate};
pub use word_count::count_words;

/// Word limit for roughly one minute of audio.
pub const TARGET_WORDS: usize = 150;

/// A user-supplied subject. Only surrounding whitespace is removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Topic(String);

impl Topic {
    /// Create a topic from raw input.
    #[must_use]
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_owned())
    }

    /// Topic text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the topic is empty after trimming.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Topic {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// One line of a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// `Speaker: dialogue`, split at the first colon.
    Labeled {
        /// Text before the first colon, trimmed.
        speaker: &'a str,
        /// Text after the first colon, trimmed.
        dialogue: &'a str,
    },
    /// A line without a colon; all of it is dialogue.
    Plain(&'a str),
}

impl<'a> Line<'a> {
    /// Classify a single line.
    #[must_use]
    pub fn parse(line: &'a str) -> Self {
        match line.split_once(':') {
            Some((speaker, dialogue)) => Self::Labeled {
                speaker: speaker.trim(),
                dialogue: dialogue.trim(),
            },
            None => Self::Plain(line.trim()),
        }
    }

    /// The spoken part of the line.
    #[must_use]
    pub const fn dialogue(&self) -> &'a str {
        match *self {
            Self::Labeled { dialogue, .. } => dialogue,
            Self::Plain(text) => text,
        }
    }

    /// The speaker label, if any.
    #[must_use]
    pub const fn speaker(&self) -> Option<&'a str> {
        match *self {
            Self::Labeled { speaker, .. } => Some(speaker),
            Self::Plain(_) => None,
        }
    }
}

/// Whether a script fits the word target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthCheck {
    /// At most [`TARGET_WORDS`].
    WithinTarget {
        /// Dialogue word count.
        words: usize,
    },
    /// Longer than [`TARGET_WORDS`]; audio will likely run over a minute.
    OverTarget {
        /// Dialogue word count.
        words: usize,
        /// Words beyond the target.
        excess: usize,
    },
}

impl LengthCheck {
    /// Classify a word count against [`TARGET_WORDS`].
    #[must_use]
    pub const fn for_count(words: usize) -> Self {
        if words > TARGET_WORDS {
            Self::OverTarget {
                words,
                excess: words - TARGET_WORDS,
            }
        } else {
            Self::WithinTarget { words }
        }
    }

    /// The word count that was checked.
    #[must_use]
    pub const fn words(&self) -> usize {
        match *self {
            Self::WithinTarget { words } | Self::OverTarget { words, .. } => words,
        }
    }

    /// Whether the target was exceeded.
    #[must_use]
    pub const fn is_over(&self) -> bool {
        matches!(self, Self::OverTarget { .. })
    }
}

/// Generated dialogue text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script(String);

impl Script {
    /// Wrap dialogue text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Full text, as generated.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Text without surrounding whitespace; this is what gets persisted and spoken.
    #[must_use]
    pub fn trimmed(&self) -> &str {
        self.0.trim()
    }

    /// Non-empty lines in order.
    pub fn lines(&self) -> impl Iterator<Item = Line<'_>> {
        self.0
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(Line::parse)
    }

    /// Distinct speaker labels in order of first appearance.
    #[must_use]
    pub fn speakers(&self) -> Vec<&str> {
        let mut speakers: Vec<&str> = Vec::new();
        for speaker in self.lines().filter_map(|line| line.speaker()) {
            if !speakers.contains(&speaker) {
                speakers.push(speaker);
            }
        }
        speakers
    }

    /// Dialogue word count.
    #[must_use]
    pub fn word_count(&self) -> usize {
        count_words(&self.0)
    }

    /// Word count checked against [`TARGET_WORDS`].
    #[must_use]
    pub fn length_check(&self) -> LengthCheck {
        LengthCheck::for_count(self.word_count())
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
