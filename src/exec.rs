//! Testable subprocess execution.
//!
//! Every external tool (recorder, transcriber, answerer) is launched through
//! the `CommandExecutor` trait so pipeline logic can be tested without any
//! tool installed.

use crate::error::{OverhearError, Result};
use std::process::Command;

/// Captured output of one subprocess invocation.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit status reported success. Callers decide what a non-zero exit
    /// means: ffmpeg output is judged by file presence, not exit code.
    pub success: bool,
}

impl CommandOutput {
    /// A successful output carrying only stdout, for tests and mocks.
    pub fn stdout_only(stdout: &str) -> Self {
        Self {
            stdout: stdout.to_string(),
            stderr: String::new(),
            success: true,
        }
    }
}

/// Trait for executing system commands.
///
/// Object-safe, Send + Sync for use from concurrent consumers.
/// Returns Err only when the process could not be launched; a launched
/// process that exits non-zero still yields Ok with `success == false`.
pub trait CommandExecutor: Send + Sync {
    fn execute(&self, command: &str, args: &[&str]) -> Result<CommandOutput>;
}

/// Production command executor using std::process::Command.
#[derive(Debug, Clone, Default)]
pub struct SystemCommandExecutor;

impl SystemCommandExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl CommandExecutor for SystemCommandExecutor {
    fn execute(&self, command: &str, args: &[&str]) -> Result<CommandOutput> {
        let output = Command::new(command).args(args).output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                OverhearError::ToolNotFound {
                    tool: command.to_string(),
                }
            } else {
                OverhearError::ToolFailed {
                    tool: command.to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
        })
    }
}

/// Mock command executor for testing.
///
/// Records all command executions and returns configured responses in order.
/// Once the configured responses are exhausted it returns empty successes.
#[derive(Debug, Default)]
pub struct MockCommandExecutor {
    calls: std::sync::Mutex<Vec<(String, Vec<String>)>>,
    responses: std::sync::Mutex<std::collections::VecDeque<Result<CommandOutput>>>,
}

impl MockCommandExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response with the given stdout.
    pub fn with_stdout(self, stdout: &str) -> Self {
        self.push(Ok(CommandOutput::stdout_only(stdout)));
        self
    }

    /// Queue a full response.
    pub fn with_output(self, output: CommandOutput) -> Self {
        self.push(Ok(output));
        self
    }

    /// Queue a launch failure.
    pub fn with_error(self, error: OverhearError) -> Self {
        self.push(Err(error));
        self
    }

    fn push(&self, response: Result<CommandOutput>) {
        #[allow(clippy::unwrap_used)]
        self.responses.lock().unwrap().push_back(response);
    }

    /// All recorded calls as (command, args) pairs.
    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        #[allow(clippy::unwrap_used)]
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        #[allow(clippy::unwrap_used)]
        self.calls.lock().unwrap().len()
    }
}

impl CommandExecutor for MockCommandExecutor {
    fn execute(&self, command: &str, args: &[&str]) -> Result<CommandOutput> {
        #[allow(clippy::unwrap_used)]
        self.calls.lock().unwrap().push((
            command.to_string(),
            args.iter().map(|s| s.to_string()).collect(),
        ));

        #[allow(clippy::unwrap_used)]
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(CommandOutput::stdout_only("")))
    }
}
