//! ffmpeg-based chunk recorder.

use crate::defaults;
use crate::error::{OverhearError, Result};
use crate::exec::{CommandExecutor, SystemCommandExecutor};
use crate::record::Recorder;
use std::path::Path;

/// Records audio chunks by invoking ffmpeg once per chunk.
///
/// ffmpeg's exit status is unreliable across input backends, so success is
/// judged by the presence of the output file, the same signal the rest of
/// the pipeline relies on.
pub struct FfmpegRecorder<E: CommandExecutor> {
    executor: E,
    input_format: String,
    input_device: String,
}

impl<E: CommandExecutor> FfmpegRecorder<E> {
    pub fn new(executor: E, input_format: &str, input_device: &str) -> Self {
        Self {
            executor,
            input_format: input_format.to_string(),
            input_device: input_device.to_string(),
        }
    }
}

impl FfmpegRecorder<SystemCommandExecutor> {
    /// ffmpeg recorder with the system executor and default ALSA input.
    pub fn system(input_format: &str, input_device: &str) -> Self {
        Self::new(SystemCommandExecutor::new(), input_format, input_device)
    }
}

impl<E: CommandExecutor> Recorder for FfmpegRecorder<E> {
    fn capture(&self, path: &Path, duration_secs: u32) -> Result<()> {
        let duration = duration_secs.to_string();
        let output_path = path.display().to_string();
        let args = [
            "-f",
            self.input_format.as_str(),
            "-i",
            self.input_device.as_str(),
            "-t",
            duration.as_str(),
            "-y",
            output_path.as_str(),
        ];

        match self.executor.execute(defaults::RECORDER_TOOL, &args) {
            Ok(_) => {}
            // A missing binary can never produce a file; surface it directly.
            Err(e @ OverhearError::ToolNotFound { .. }) => return Err(e),
            Err(_) => {}
        }

        if path.exists() {
            Ok(())
        } else {
            Err(OverhearError::RecordingFailed {
                path: output_path,
            })
        }
    }
}
