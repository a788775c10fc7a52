//! OpenAI-backed implementations of the transcription and generation
//! service traits, plus mock implementations for deterministic tests.
//!
//! ## Crate Position
//!
//! Depends on: veritas-core.
//! Depended on by: veritas-server (and the root binary).

pub mod mock;
pub mod openai;
pub mod transcribe;

pub use mock::{MockCompleter, MockTranscriber};
pub use openai::ChatCompleter;
pub use transcribe::WhisperTranscriber;
