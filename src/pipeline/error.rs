//! Failure reporting for pipeline workers.

use std::fmt;
use std::sync::Mutex;

/// A failure observed while processing one chunk.
#[derive(Debug, Clone)]
pub enum ChunkFailure {
    /// The worker continues with the next item (chunk lost or degraded).
    Recoverable(String),
    /// The worker cannot continue.
    Fatal(String),
}

impl fmt::Display for ChunkFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChunkFailure::Recoverable(msg) => write!(f, "Recoverable error: {}", msg),
            ChunkFailure::Fatal(msg) => write!(f, "Fatal error: {}", msg),
        }
    }
}

impl std::error::Error for ChunkFailure {}

/// Trait for reporting worker failures.
///
/// Injected into the pipeline so tests can observe failures without
/// scraping stderr.
pub trait ErrorReporter: Send + Sync {
    /// Reports a failure from the named pipeline role.
    fn report(&self, role: &str, failure: &ChunkFailure);
}

/// Simple error reporter that logs to stderr with a marker.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl ErrorReporter for LogReporter {
    fn report(&self, role: &str, failure: &ChunkFailure) {
        eprintln!("❌ overhear [{}] {}", role, failure);
    }
}

/// Reporter that collects failures in memory, for tests.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    reports: Mutex<Vec<(String, String)>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All reports as (role, message) pairs.
    pub fn reports(&self) -> Vec<(String, String)> {
        #[allow(clippy::unwrap_used)]
        self.reports.lock().unwrap().clone()
    }
}

impl ErrorReporter for MemoryReporter {
    fn report(&self, role: &str, failure: &ChunkFailure) {
        #[allow(clippy::unwrap_used)]
        self.reports
            .lock()
            .unwrap()
            .push((role.to_string(), failure.to_string()));
    }
}
