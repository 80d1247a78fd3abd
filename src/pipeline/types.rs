//! Data types flowing through the chunk pipeline.

use serde::Serialize;
use std::path::PathBuf;
use std::time::SystemTime;

/// Handle to one recorded audio chunk awaiting transcription.
///
/// Created by the producer; ownership transfers through the queue, so the
/// backing file is never touched by two workers. Deletion is tied to the
/// handle: the owning consumer drops it after processing, and abandoned
/// chunks (failed send, queue teardown, worker unwind) are cleaned up the
/// same way.
#[derive(Debug, PartialEq)]
pub struct Chunk {
    /// Sequential index assigned by the producer.
    pub index: u64,
    /// Location of the recorded file on disk.
    pub path: PathBuf,
    /// Wall-clock time the recording finished.
    pub recorded_at: SystemTime,
}

impl Chunk {
    pub fn new(index: u64, path: PathBuf) -> Self {
        Self {
            index,
            path,
            recorded_at: SystemTime::now(),
        }
    }

    /// Human-readable origin label carried into the result log,
    /// e.g. `chunk_003.wav @ 2026-08-24T10:15:02Z`.
    pub fn source_label(&self) -> String {
        let file = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string());
        format!(
            "{} @ {}",
            file,
            humantime::format_rfc3339_seconds(self.recorded_at)
        )
    }
}

impl Drop for Chunk {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            eprintln!("overhear: failed to delete {}: {}", self.path.display(), e);
        }
    }
}

/// Transcript of one chunk, owned by the consumer that produced it and
/// discarded after question extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    pub text: String,
    pub source: String,
}

/// One answered question, appended to the result log and immutable after.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionAnswer {
    pub question: String,
    pub answer: String,
    /// Wall-clock time the answer was recorded (RFC 3339, second precision).
    pub timestamp: String,
    /// Reserved for a future scoring step; always 0.0 today.
    pub confidence: f32,
    /// Which chunk and wall-clock moment this came from.
    pub source: String,
}

impl QuestionAnswer {
    pub fn new(question: &str, answer: &str, source: &str) -> Self {
        Self {
            question: question.to_string(),
            answer: answer.to_string(),
            timestamp: humantime::format_rfc3339_seconds(SystemTime::now()).to_string(),
            confidence: 0.0,
            source: source.to_string(),
        }
    }
}
