//! The topic-to-audio pipeline.
//!
//! A run is strictly sequential: generate the script, persist it, then make
//! one synthesis attempt. A filesystem error while persisting stops the run
//! before synthesis. An over-length script only produces a warning.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::error::Result;
use crate::output::OutputDir;
use crate::script::{DialogueSource, LengthCheck, Script, Topic};
use crate::synthesis::{SpeechSynthesizer, SynthesisOutcome, invoke};
use crate::writer::ScriptWriter;

/// A script that has been generated and saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedScript {
    /// The topic it was generated for.
    pub topic: Topic,
    /// Whether a hand-written dialogue was used.
    pub authored: bool,
    /// The script.
    pub script: Script,
    /// Word count against the target.
    pub length: LengthCheck,
    /// The saved Markdown file.
    pub script_path: PathBuf,
}

/// Everything a full run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// The saved script.
    pub prepared: PreparedScript,
    /// The synthesis attempt.
    pub outcome: SynthesisOutcome,
}

/// Drives script generation, persistence and synthesis.
#[derive(Debug)]
pub struct Pipeline<S> {
    synthesizer: S,
    writer: ScriptWriter,
}

impl<S: SpeechSynthesizer> Pipeline<S> {
    /// Create a pipeline writing under `output`.
    pub const fn new(synthesizer: S, output: OutputDir) -> Self {
        Self {
            synthesizer,
            writer: ScriptWriter::new(output),
        }
    }

    /// The synthesizer.
    pub const fn synthesizer(&self) -> &S {
        &self.synthesizer
    }

    /// Where artifacts go.
    pub const fn output(&self) -> &OutputDir {
        self.writer.output()
    }

    /// Generate and save the script for `topic`.
    pub fn prepare(&self, topic: &Topic) -> Result<PreparedScript> {
        let source = DialogueSource::select(topic);
        let script = source.render();
        let length = script.length_check();

        if let LengthCheck::OverTarget { words, excess } = length {
            warn!(words, excess, "script exceeds target length");
        }

        let script_path = self.writer.write(topic, &script)?;
        info!(topic = %topic, authored = source.is_authored(), words = length.words(), "script prepared");

        Ok(PreparedScript {
            topic: topic.clone(),
            authored: source.is_authored(),
            script,
            length,
            script_path,
        })
    }

    /// Make one synthesis attempt for a prepared script.
    pub async fn synthesize(&self, prepared: &PreparedScript) -> SynthesisOutcome {
        invoke(&self.synthesizer, self.writer.output(), &prepared.script).await
    }

    /// Prepare then synthesize.
    pub async fn run(&self, topic: &Topic) -> Result<RunReport> {
        let prepared = self.prepare(topic)?;
        let outcome = self.synthesize(&prepared).await;
        Ok(RunReport { prepared, outcome })
    }
}
