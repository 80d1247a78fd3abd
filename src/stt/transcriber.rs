use crate::error::{OverhearError, Result};
use std::path::Path;
use std::sync::Arc;

/// Trait for speech-to-text transcription of a recorded chunk file.
///
/// This trait allows swapping implementations (external CLI vs mock).
pub trait Transcriber: Send + Sync {
    /// Transcribe the audio file at `audio_path` to text.
    fn transcribe(&self, audio_path: &Path) -> Result<String>;
}

/// Implement Transcriber for Arc<T> to allow sharing across consumers.
impl<T: Transcriber + ?Sized> Transcriber for Arc<T> {
    fn transcribe(&self, audio_path: &Path) -> Result<String> {
        (**self).transcribe(audio_path)
    }
}

/// Mock transcriber for testing
#[derive(Debug, Clone)]
pub struct MockTranscriber {
    response: String,
    should_fail: bool,
}

impl Default for MockTranscriber {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTranscriber {
    pub fn new() -> Self {
        Self {
            response: "mock transcription".to_string(),
            should_fail: false,
        }
    }

    /// Configure the mock to return a specific transcript
    pub fn with_response(mut self, response: &str) -> Self {
        self.response = response.to_string();
        self
    }

    /// Configure the mock to fail on transcribe
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }
}

impl Transcriber for MockTranscriber {
    fn transcribe(&self, _audio_path: &Path) -> Result<String> {
        if self.should_fail {
            Err(OverhearError::Transcription {
                message: "mock transcription failure".to_string(),
            })
        } else {
            Ok(self.response.clone())
        }
    }
}
