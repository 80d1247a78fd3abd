use crate::error::{OverhearError, Result};
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Instant;

/// Trait for extracting question sentences from a transcript.
pub trait QuestionExtractor: Send + Sync {
    /// Returns the questions found in `transcript`, possibly none.
    fn extract(&self, transcript: &str) -> Result<Vec<String>>;
}

/// Implement QuestionExtractor for Arc<T> to allow sharing across consumers.
impl<T: QuestionExtractor + ?Sized> QuestionExtractor for Arc<T> {
    fn extract(&self, transcript: &str) -> Result<Vec<String>> {
        (**self).extract(transcript)
    }
}

/// Mock extractor for testing.
///
/// Can be scripted to fail transiently a fixed number of times before
/// succeeding, and records the instant of every call so backoff timing can
/// be asserted.
#[derive(Debug, Default)]
pub struct MockExtractor {
    questions: Vec<String>,
    transient_failures: usize,
    fail_always: bool,
    calls: Mutex<Vec<Instant>>,
}

impl MockExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Questions returned on a successful call.
    pub fn with_questions(mut self, questions: &[&str]) -> Self {
        self.questions = questions.iter().map(|q| q.to_string()).collect();
        self
    }

    /// Fail the first `count` calls with a transient request error.
    pub fn with_transient_failures(mut self, count: usize) -> Self {
        self.transient_failures = count;
        self
    }

    /// Fail every call with a transient request error.
    pub fn with_persistent_failure(mut self) -> Self {
        self.fail_always = true;
        self
    }

    /// Number of extraction calls made so far.
    pub fn call_count(&self) -> usize {
        #[allow(clippy::unwrap_used)]
        self.calls.lock().unwrap().len()
    }

    /// Instants at which calls were made, in order.
    pub fn call_instants(&self) -> Vec<Instant> {
        #[allow(clippy::unwrap_used)]
        self.calls.lock().unwrap().clone()
    }
}

impl QuestionExtractor for MockExtractor {
    fn extract(&self, _transcript: &str) -> Result<Vec<String>> {
        #[allow(clippy::unwrap_used)]
        let call = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(Instant::now());
            calls.len()
        };

        if self.fail_always || call <= self.transient_failures {
            return Err(OverhearError::ExtractionRequest {
                message: "mock connection refused".to_string(),
            });
        }

        Ok(self.questions.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_extractor_returns_questions() {
        let extractor = MockExtractor::new().with_questions(&["What is the weather?"]);
        let questions = extractor.extract("transcript").unwrap();
        assert_eq!(questions, vec!["What is the weather?"]);
        assert_eq!(extractor.call_count(), 1);
    }

    #[test]
    fn test_mock_extractor_transient_then_success() {
        let extractor = MockExtractor::new()
            .with_questions(&["Q?"])
            .with_transient_failures(2);

        assert!(extractor.extract("t").unwrap_err().is_transient());
        assert!(extractor.extract("t").unwrap_err().is_transient());
        assert_eq!(extractor.extract("t").unwrap(), vec!["Q?"]);
        assert_eq!(extractor.call_count(), 3);
    }

    #[test]
    fn test_mock_extractor_persistent_failure() {
        let extractor = MockExtractor::new().with_persistent_failure();
        for _ in 0..5 {
            assert!(extractor.extract("t").is_err());
        }
    }

    #[test]
    fn test_extractor_trait_is_object_safe() {
        let extractor: Box<dyn QuestionExtractor> = Box::new(MockExtractor::new());
        assert!(extractor.extract("t").unwrap().is_empty());
    }
}
