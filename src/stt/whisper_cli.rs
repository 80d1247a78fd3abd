//! Transcription through an external whisper CLI.

use crate::error::{OverhearError, Result};
use crate::exec::{CommandExecutor, SystemCommandExecutor};
use crate::stt::Transcriber;
use std::path::{Path, PathBuf};

/// Transcriber that spawns a whisper CLI process per chunk.
///
/// Invocation: `<tool> <audio file> --model <model path>`.
/// The full transcript is read from the process's standard output.
pub struct WhisperCliTranscriber<E: CommandExecutor> {
    executor: E,
    tool: String,
    model_path: PathBuf,
}

impl<E: CommandExecutor> WhisperCliTranscriber<E> {
    pub fn new(executor: E, tool: &str, model_path: PathBuf) -> Self {
        Self {
            executor,
            tool: tool.to_string(),
            model_path,
        }
    }
}

impl WhisperCliTranscriber<SystemCommandExecutor> {
    pub fn system(tool: &str, model_path: PathBuf) -> Self {
        Self::new(SystemCommandExecutor::new(), tool, model_path)
    }
}

impl<E: CommandExecutor> Transcriber for WhisperCliTranscriber<E> {
    fn transcribe(&self, audio_path: &Path) -> Result<String> {
        let audio = audio_path.display().to_string();
        let model = self.model_path.display().to_string();
        let output = self
            .executor
            .execute(&self.tool, &[audio.as_str(), "--model", model.as_str()])?;

        if !output.success {
            return Err(OverhearError::Transcription {
                message: format!(
                    "{} exited with failure: {}",
                    self.tool,
                    output.stderr.trim()
                ),
            });
        }

        Ok(output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::{CommandOutput, MockCommandExecutor};

    #[test]
    fn test_invocation_args() {
        let mock = MockCommandExecutor::new().with_stdout("[00:00:00.000] hello\n");
        let transcriber =
            WhisperCliTranscriber::new(mock, "whisper-cli", PathBuf::from("/models/base.bin"));

        let text = transcriber
            .transcribe(Path::new("/tmp/chunk_000.wav"))
            .unwrap();
        assert_eq!(text, "[00:00:00.000] hello\n");

        let calls = transcriber.executor.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "whisper-cli");
        assert_eq!(
            calls[0].1,
            vec!["/tmp/chunk_000.wav", "--model", "/models/base.bin"]
        );
    }

    #[test]
    fn test_custom_tool_path() {
        let mock = MockCommandExecutor::new();
        let transcriber = WhisperCliTranscriber::new(
            mock,
            "/opt/whisper/whisper-cli",
            PathBuf::from("model.bin"),
        );
        transcriber.transcribe(Path::new("c.wav")).unwrap();
        assert_eq!(transcriber.executor.calls()[0].0, "/opt/whisper/whisper-cli");
    }

    #[test]
    fn test_nonzero_exit_is_transcription_error() {
        let mock = MockCommandExecutor::new().with_output(CommandOutput {
            stdout: String::new(),
            stderr: "failed to load model".to_string(),
            success: false,
        });
        let transcriber = WhisperCliTranscriber::new(mock, "whisper-cli", PathBuf::from("m.bin"));

        match transcriber.transcribe(Path::new("c.wav")) {
            Err(OverhearError::Transcription { message }) => {
                assert!(message.contains("failed to load model"));
            }
            other => panic!("Expected Transcription error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_tool_propagates() {
        let mock = MockCommandExecutor::new().with_error(OverhearError::ToolNotFound {
            tool: "whisper-cli".to_string(),
        });
        let transcriber = WhisperCliTranscriber::new(mock, "whisper-cli", PathBuf::from("m.bin"));
        assert!(matches!(
            transcriber.transcribe(Path::new("c.wav")),
            Err(OverhearError::ToolNotFound { .. })
        ));
    }
}
