//! Process execution adapter
//!
//! Spawns engine commands with `std::process` and exposes their standard
//! output as a lazy line iterator. Standard error is inherited so the
//! engine's own diagnostics reach the console as they happen.

use std::io::{BufRead, BufReader, Lines};
use std::process::{Child, ChildStdout, Command, ExitStatus, Stdio};

use tracing::debug;

use crate::domain::errors::*;
use crate::engine::EngineCommand;
use crate::ports::*;

/// Runs engine commands as child processes
pub struct ProcessAdapter;

impl ProcessAdapter {
    /// Create new process adapter
    pub fn new() -> Self {
        Self
    }

    /// Spawn `command` and return its output stream
    pub fn spawn(&self, command: &EngineCommand) -> Result<ProcessOutput, DomainError> {
        debug!("Spawning: {}", command);

        let mut child = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| {
                DomainError::ProcessFailed(format!("Failed to start {}: {}", command.program, e))
            })?;

        let stdout = child.stdout.take().ok_or_else(|| {
            DomainError::ProcessFailed(format!("No stdout captured for {}", command.program))
        })?;

        Ok(ProcessOutput {
            command: command.to_string(),
            state: StreamState::Streaming {
                child,
                lines: BufReader::new(stdout).lines(),
            },
        })
    }
}

impl Default for ProcessAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutePort for ProcessAdapter {
    fn execute(&self, command: &EngineCommand) -> Result<OutputLines, DomainError> {
        Ok(Box::new(self.spawn(command)?))
    }
}

enum StreamState {
    /// Child is running; lines are read as they arrive
    Streaming {
        child: Child,
        lines: Lines<BufReader<ChildStdout>>,
    },
    /// Standard output is exhausted and the exit status has been collected
    Exited(ExitStatus),
    /// Reading or waiting failed; nothing more will be produced
    Broken,
}

/// Single-pass stream of a child's output lines
///
/// After the last line the child is reaped. A nonzero exit surfaces as one
/// final `Err` item, after which the iterator is exhausted.
pub struct ProcessOutput {
    command: String,
    state: StreamState,
}

impl ProcessOutput {
    /// Exit status once the stream has been fully consumed
    pub fn exit_status(&self) -> Option<ExitStatus> {
        match self.state {
            StreamState::Exited(status) => Some(status),
            _ => None,
        }
    }

    fn finish(&mut self) -> Option<Result<String, DomainError>> {
        let mut child = match std::mem::replace(&mut self.state, StreamState::Broken) {
            StreamState::Streaming { child, .. } => child,
            other => {
                self.state = other;
                return None;
            }
        };

        match child.wait() {
            Ok(status) => {
                self.state = StreamState::Exited(status);
                if status.success() {
                    debug!("Finished: {}", self.command);
                    None
                } else {
                    Some(Err(DomainError::ProcessFailed(format!(
                        "`{}` exited with {}",
                        self.command, status
                    ))))
                }
            }
            Err(e) => Some(Err(DomainError::ProcessFailed(format!(
                "Failed to wait for `{}`: {}",
                self.command, e
            )))),
        }
    }

    fn abort(&mut self, error: std::io::Error) -> Option<Result<String, DomainError>> {
        if let StreamState::Streaming { mut child, .. } =
            std::mem::replace(&mut self.state, StreamState::Broken)
        {
            let _ = child.kill();
            let _ = child.wait();
        }
        Some(Err(DomainError::ProcessFailed(format!(
            "Failed to read output of `{}`: {}",
            self.command, error
        ))))
    }
}

impl Iterator for ProcessOutput {
    type Item = Result<String, DomainError>;

    fn next(&mut self) -> Option<Self::Item> {
        let StreamState::Streaming { lines, .. } = &mut self.state else {
            return None;
        };

        match lines.next() {
            Some(Ok(line)) => Some(Ok(line)),
            Some(Err(e)) => self.abort(e),
            None => self.finish(),
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> EngineCommand {
        EngineCommand::new("sh").args(["-c", script])
    }

    #[test]
    fn test_streams_lines_in_order() {
        let adapter = ProcessAdapter::new();
        let mut output = adapter.spawn(&sh("echo first; echo second")).unwrap();

        assert_eq!(output.next().unwrap().unwrap(), "first");
        assert_eq!(output.next().unwrap().unwrap(), "second");
        assert!(output.next().is_none());
        assert!(output.exit_status().unwrap().success());
        assert!(output.next().is_none());
    }

    #[test]
    fn test_nonzero_exit_is_final_error() {
        let adapter = ProcessAdapter::new();
        let items: Vec<_> = adapter.spawn(&sh("echo partial; exit 3")).unwrap().collect();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].as_ref().unwrap(), "partial");
        assert!(matches!(items[1], Err(DomainError::ProcessFailed(_))));
    }

    #[test]
    fn test_exit_status_recorded_on_failure() {
        let adapter = ProcessAdapter::new();
        let mut output = adapter.spawn(&sh("exit 1")).unwrap();

        assert!(output.exit_status().is_none());
        assert!(output.next().unwrap().is_err());
        assert_eq!(output.exit_status().unwrap().code(), Some(1));
    }

    #[test]
    fn test_missing_program() {
        let adapter = ProcessAdapter::new();
        let result = adapter.spawn(&EngineCommand::new("sbcut-definitely-not-installed"));
        assert!(matches!(result, Err(DomainError::ProcessFailed(_))));
    }

    #[test]
    fn test_capture() {
        let adapter = ProcessAdapter::new();
        assert_eq!(adapter.capture(&sh("printf '12.5\\n'")).unwrap(), "12.5\n");
        assert!(adapter.capture(&sh("echo 1; exit 2")).is_err());
    }
}
