//! Edcast - one-minute educational dialogues, scripted and voiced.
//!
//! This crate turns a topic into a short two-speaker script (Mike and Sara),
//! saves it as Markdown, and has the Gemini text-to-speech API read it aloud
//! into a WAV file.

pub mod audio;
pub mod config;
pub mod credentials;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod prelude;
pub mod script;
pub mod synthesis;
pub mod writer;

pub use error::{Error, Result};
