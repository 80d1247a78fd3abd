//! overhear - ambient question answering from short audio chunks
//!
//! Records audio in fixed-length chunks, transcribes each chunk, asks an
//! extraction service for the questions it contains and answers them with
//! a local model, accumulating a question/answer log printed at shutdown.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod answer;
pub mod app;
pub mod cli;
pub mod config;
pub mod defaults;
pub mod diagnostics;
pub mod error;
pub mod exec;
pub mod extract;
pub mod output;
pub mod pipeline;
pub mod record;
pub mod stt;

// Core traits (record → transcribe → extract → answer)
pub use answer::Answerer;
pub use exec::{CommandExecutor, SystemCommandExecutor};
pub use extract::{QuestionExtractor, RetryPolicy, extract_with_retry};
pub use record::Recorder;
pub use stt::Transcriber;

// Pipeline
pub use pipeline::{
    Canceller, Chunk, Pipeline, PipelineConfig, PipelineHandle, QuestionAnswer, ResultLog,
    Transcript,
};

// Error handling
pub use error::{OverhearError, Result};

// Config
pub use config::{Config, default_config_path};

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.0+abc1234"` when git hash is available, `"0.1.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_string_starts_with_cargo_version() {
        let ver = version_string();
        assert!(
            ver.starts_with(env!("CARGO_PKG_VERSION")),
            "version_string should start with CARGO_PKG_VERSION, got: {}",
            ver
        );
    }

    #[test]
    fn version_string_contains_plus_when_git_hash_present() {
        let ver = version_string();
        if option_env!("GIT_HASH").is_some_and(|h| !h.is_empty()) {
            assert!(
                ver.contains('+'),
                "With GIT_HASH set, version should contain '+', got: {}",
                ver
            );
        } else {
            assert_eq!(ver, env!("CARGO_PKG_VERSION"));
        }
    }
}
