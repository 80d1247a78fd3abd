//! Answering via a fresh local-model subprocess per question.

use crate::answer::Answerer;
use crate::error::{OverhearError, Result};
use crate::exec::{CommandExecutor, SystemCommandExecutor};

/// Answerer that runs `ollama run <model> <question>` for every question.
///
/// No session reuse: each question gets a fresh process. Anything the
/// process writes to stderr is logged as a warning and otherwise ignored,
/// because ollama prints progress noise there even on success.
pub struct OllamaAnswerer<E: CommandExecutor> {
    executor: E,
    tool: String,
    model: String,
}

impl<E: CommandExecutor> OllamaAnswerer<E> {
    pub fn new(executor: E, tool: &str, model: &str) -> Self {
        Self {
            executor,
            tool: tool.to_string(),
            model: model.to_string(),
        }
    }
}

impl OllamaAnswerer<SystemCommandExecutor> {
    pub fn system(tool: &str, model: &str) -> Self {
        Self::new(SystemCommandExecutor::new(), tool, model)
    }
}

impl<E: CommandExecutor> Answerer for OllamaAnswerer<E> {
    fn ask(&self, question: &str) -> Result<String> {
        let output = self
            .executor
            .execute(&self.tool, &["run", self.model.as_str(), question])?;

        if !output.stderr.trim().is_empty() {
            eprintln!("overhear: {} warning: {}", self.tool, output.stderr.trim());
        }

        if !output.success && output.stdout.trim().is_empty() {
            return Err(OverhearError::Answer {
                message: format!("{} exited with failure", self.tool),
            });
        }

        Ok(output.stdout.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::{CommandOutput, MockCommandExecutor};

    #[test]
    fn test_invocation_args() {
        let mock = MockCommandExecutor::new().with_stdout("Sunny.\n");
        let answerer = OllamaAnswerer::new(mock, "ollama", "granite3.2");

        let answer = answerer.ask("What is the weather?").unwrap();
        assert_eq!(answer, "Sunny.");

        let calls = answerer.executor.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "ollama");
        assert_eq!(calls[0].1, vec!["run", "granite3.2", "What is the weather?"]);
    }

    #[test]
    fn test_answer_is_trimmed() {
        let mock = MockCommandExecutor::new().with_stdout("\n  The answer.  \n\n");
        let answerer = OllamaAnswerer::new(mock, "ollama", "granite3.2");
        assert_eq!(answerer.ask("Q?").unwrap(), "The answer.");
    }

    #[test]
    fn test_stderr_is_not_fatal() {
        let mock = MockCommandExecutor::new().with_output(CommandOutput {
            stdout: "Sunny.".to_string(),
            stderr: "pulling manifest...".to_string(),
            success: true,
        });
        let answerer = OllamaAnswerer::new(mock, "ollama", "granite3.2");
        assert_eq!(answerer.ask("Q?").unwrap(), "Sunny.");
    }

    #[test]
    fn test_failure_with_no_output_is_error() {
        let mock = MockCommandExecutor::new().with_output(CommandOutput {
            stdout: String::new(),
            stderr: "model not found".to_string(),
            success: false,
        });
        let answerer = OllamaAnswerer::new(mock, "ollama", "granite3.2");
        assert!(matches!(
            answerer.ask("Q?"),
            Err(OverhearError::Answer { .. })
        ));
    }

    #[test]
    fn test_failure_with_partial_output_keeps_text() {
        // A truncated answer is still better than none; the consumer decides.
        let mock = MockCommandExecutor::new().with_output(CommandOutput {
            stdout: "Partial answer".to_string(),
            stderr: "killed".to_string(),
            success: false,
        });
        let answerer = OllamaAnswerer::new(mock, "ollama", "granite3.2");
        assert_eq!(answerer.ask("Q?").unwrap(), "Partial answer");
    }

    #[test]
    fn test_missing_tool_propagates() {
        let mock = MockCommandExecutor::new().with_error(OverhearError::ToolNotFound {
            tool: "ollama".to_string(),
        });
        let answerer = OllamaAnswerer::new(mock, "ollama", "granite3.2");
        assert!(matches!(
            answerer.ask("Q?"),
            Err(OverhearError::ToolNotFound { .. })
        ));
    }
}
