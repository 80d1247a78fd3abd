//! Retry with exponential backoff around the extraction call.

use crate::defaults;
use crate::error::Result;
use crate::extract::QuestionExtractor;
use crate::pipeline::error::{ChunkFailure, ErrorReporter};
use std::time::Duration;

/// Backoff policy for the network-dependent extraction call.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Delay before the first retry; doubled after every failed attempt.
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: defaults::MAX_EXTRACTION_ATTEMPTS,
            initial_delay: Duration::from_millis(defaults::INITIAL_BACKOFF_MS),
        }
    }
}

/// Attempt extraction up to `policy.max_attempts` times.
///
/// Only transient errors are retried; misconfiguration and contract
/// mismatches return immediately. The final transient error is returned
/// after the last attempt so the caller can abandon the chunk without
/// aborting the pipeline.
pub fn extract_with_retry(
    extractor: &dyn QuestionExtractor,
    transcript: &str,
    policy: &RetryPolicy,
    reporter: &dyn ErrorReporter,
) -> Result<Vec<String>> {
    let mut delay = policy.initial_delay;
    let mut attempt = 1;

    loop {
        match extractor.extract(transcript) {
            Ok(questions) => return Ok(questions),
            Err(e) if !e.is_transient() => return Err(e),
            Err(e) => {
                reporter.report(
                    "extractor",
                    &ChunkFailure::Recoverable(format!(
                        "attempt {}/{} failed: {}",
                        attempt, policy.max_attempts, e
                    )),
                );
                if attempt >= policy.max_attempts {
                    return Err(e);
                }
                std::thread::sleep(delay);
                delay *= 2;
                attempt += 1;
            }
        }
    }
}
