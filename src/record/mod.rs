//! Audio chunk recording.
//!
//! The producer records fixed-duration chunks through the `Recorder` trait.
//! A recording failure loses that chunk: the time window has already passed,
//! so there is nothing to retry.

pub mod ffmpeg;

pub use ffmpeg::FfmpegRecorder;

use crate::error::{OverhearError, Result};
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Trait for recording one audio chunk to disk.
///
/// Implementations must create a file at `path` on success.
pub trait Recorder: Send + Sync {
    /// Record `duration_secs` seconds of audio into the file at `path`.
    fn capture(&self, path: &Path, duration_secs: u32) -> Result<()>;
}

/// Mock recorder for testing.
///
/// Creates real (empty) files so chunk-deletion behavior can be verified,
/// and can be scripted to fail on specific chunk indices.
#[derive(Debug, Default)]
pub struct MockRecorder {
    captures: AtomicUsize,
    fail_on: Mutex<Vec<usize>>,
}

impl MockRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the capture with the given zero-based call index.
    pub fn with_failure_at(self, call_index: usize) -> Self {
        #[allow(clippy::unwrap_used)]
        self.fail_on.lock().unwrap().push(call_index);
        self
    }

    /// Number of capture calls made so far.
    pub fn capture_count(&self) -> usize {
        self.captures.load(Ordering::SeqCst)
    }
}

impl Recorder for MockRecorder {
    fn capture(&self, path: &Path, _duration_secs: u32) -> Result<()> {
        let call = self.captures.fetch_add(1, Ordering::SeqCst);
        #[allow(clippy::unwrap_used)]
        let should_fail = self.fail_on.lock().unwrap().contains(&call);
        if should_fail {
            return Err(OverhearError::RecordingFailed {
                path: path.display().to_string(),
            });
        }
        std::fs::write(path, b"RIFF")?;
        Ok(())
    }
}
