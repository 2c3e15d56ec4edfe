//! Integration tests for the edcast pipeline.

#![allow(clippy::unwrap_used, clippy::panic)]

use assert_fs::prelude::*;
use edcast::credentials::{API_KEY_VARS, PLACEHOLDER_KEY};
use edcast::prelude::*;

fn pipeline(dir: &assert_fs::TempDir, synth: MockSynthesizer) -> Pipeline<MockSynthesizer> {
    Pipeline::new(synth, OutputDir::new(dir.path().join("outputs")))
}

#[tokio::test]
async fn authored_topic_produces_script_and_audio() {
    let tmp = assert_fs::TempDir::new().unwrap();
    let pipeline = pipeline(&tmp, MockSynthesizer::succeeding());

    let report = pipeline.run(&Topic::new("How plants make oxygen")).await.unwrap();

    assert!(report.prepared.authored);
    assert!(!report.prepared.length.is_over());
    assert!(report.outcome.is_success());

    let text = std::fs::read_to_string(&report.prepared.script_path).unwrap();
    let artifact = ScriptArtifact::parse(&text).unwrap();
    assert_eq!(artifact.topic, "How plants make oxygen");
    assert_eq!(artifact.word_count, count_words(report.prepared.script.as_str()));
    assert_eq!(artifact.body.trim(), report.prepared.script.trimmed());

    let audio = report.outcome.audio_path().unwrap();
    assert!(audio.starts_with(tmp.path().join("outputs")));
    assert_eq!(std::fs::read_dir(tmp.child("outputs").path()).unwrap().count(), 2);

    assert_eq!(pipeline.synthesizer().calls(), 1);
    assert_eq!(
        pipeline.synthesizer().last_input().as_deref(),
        Some(report.prepared.script.trimmed())
    );
}

#[tokio::test]
async fn long_script_is_still_written_and_synthesized() {
    let tmp = assert_fs::TempDir::new().unwrap();
    let pipeline = pipeline(&tmp, MockSynthesizer::succeeding());
    let topic = Topic::new(["the history of every ancient empire"; 10].join(" and "));

    let report = pipeline.run(&topic).await.unwrap();

    assert!(report.prepared.length.is_over());
    assert!(report.prepared.length.words() > TARGET_WORDS);
    assert!(report.prepared.script_path.is_file());
    assert_eq!(pipeline.synthesizer().calls(), 1);
    assert!(report.outcome.is_success());

    let text = std::fs::read_to_string(&report.prepared.script_path).unwrap();
    assert!(ScriptArtifact::parse(&text).unwrap().is_over_target());
}

#[tokio::test]
async fn synthesis_failure_keeps_script() {
    let tmp = assert_fs::TempDir::new().unwrap();
    let synth = MockSynthesizer::failing(SynthesisError::auth("mock", "API key not valid"));
    let pipeline = pipeline(&tmp, synth);

    let report = pipeline.run(&Topic::new("Black holes")).await.unwrap();

    assert!(!report.prepared.authored);
    assert!(report.prepared.script_path.is_file());
    match &report.outcome {
        SynthesisOutcome::Failed { diagnostic } => assert!(diagnostic.contains("API key not valid")),
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn filesystem_error_halts_before_synthesis() {
    let tmp = assert_fs::TempDir::new().unwrap();
    tmp.child("outputs").write_str("a file where the directory should be").unwrap();
    let pipeline = pipeline(&tmp, MockSynthesizer::succeeding());

    let err = pipeline.run(&Topic::new("Volcanoes")).await.unwrap_err();

    assert!(matches!(err, Error::Filesystem { .. }));
    assert_eq!(pipeline.synthesizer().calls(), 0);
}

#[test]
fn missing_credentials_fail_before_any_client_exists() {
    let err = resolve_api_key(|_| None)
        .map(GeminiConfig::new)
        .and_then(Gemini::new)
        .unwrap_err();
    assert!(err.is_missing_credential());
    for var in API_KEY_VARS {
        assert!(err.to_string().contains(var));
    }

    let placeholder = resolve_api_key(|_| Some(PLACEHOLDER_KEY.to_owned())).unwrap_err();
    assert!(placeholder.is_missing_credential());
}
