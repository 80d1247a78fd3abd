//! Speech-to-text via an external transcription CLI.

pub mod transcriber;
pub mod whisper_cli;

pub use transcriber::{MockTranscriber, Transcriber};
pub use whisper_cli::WhisperCliTranscriber;
