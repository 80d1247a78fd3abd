//! Question answering through a local model CLI.

pub mod ollama;

pub use ollama::OllamaAnswerer;

use crate::error::{OverhearError, Result};
use std::sync::Arc;
use std::sync::Mutex;

/// Trait for answering one question with the local model.
///
/// One invocation per question; implementations hold no session state.
pub trait Answerer: Send + Sync {
    fn ask(&self, question: &str) -> Result<String>;
}

/// Implement Answerer for Arc<T> to allow sharing across consumers.
impl<T: Answerer + ?Sized> Answerer for Arc<T> {
    fn ask(&self, question: &str) -> Result<String> {
        (**self).ask(question)
    }
}

/// Mock answerer for testing
#[derive(Debug, Default)]
pub struct MockAnswerer {
    response: String,
    should_fail: bool,
    questions: Mutex<Vec<String>>,
}

impl MockAnswerer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the mock to return a specific answer
    pub fn with_response(mut self, response: &str) -> Self {
        self.response = response.to_string();
        self
    }

    /// Configure the mock to fail on ask
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }

    /// Questions asked so far, in call order.
    pub fn questions(&self) -> Vec<String> {
        #[allow(clippy::unwrap_used)]
        self.questions.lock().unwrap().clone()
    }
}

impl Answerer for MockAnswerer {
    fn ask(&self, question: &str) -> Result<String> {
        #[allow(clippy::unwrap_used)]
        self.questions.lock().unwrap().push(question.to_string());
        if self.should_fail {
            Err(OverhearError::Answer {
                message: "mock answering failure".to_string(),
            })
        } else {
            Ok(self.response.clone())
        }
    }
}
