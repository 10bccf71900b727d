//! Mock tool runner for testing.
//!
//! Provides a configurable implementation of the [`ToolRunner`] trait that
//! never launches a process. Responses are scripted per command line, and
//! every call is captured for later verification.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use crate::command::ToolCommand;
use crate::error::{RunnerError, RunnerResult};
use crate::runner::{ExecutionResult, ToolRunner};

/// Predefined mock response for a tool invocation.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub exit_code: i64,
    pub stdout: String,
    pub stderr: String,
    pub duration_ms: u64,
}

impl MockResponse {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
            duration_ms: 100,
        }
    }

    pub fn failure(exit_code: i64, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: String::new(),
            stderr: stderr.into(),
            duration_ms: 100,
        }
    }
}

/// Fault to raise instead of returning a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulatedFault {
    /// The program is not installed.
    Unavailable,
    /// The program did not finish within the given number of seconds.
    Timeout(u64),
}

/// Captured call information for verification.
#[derive(Debug, Clone)]
pub struct CapturedCall {
    pub command: ToolCommand,
    pub working_dir: PathBuf,
}

impl CapturedCall {
    /// The command line as it would be displayed.
    pub fn command_line(&self) -> String {
        self.command.to_string()
    }
}

/// Mock tool runner for testing.
///
/// Lookup order for each call: the first rule registered with
/// [`MockRunner::on`] whose prefix matches the command line, then the next
/// queued response, then an empty success.
#[derive(Clone, Default)]
pub struct MockRunner {
    /// Responses keyed by command-line prefix.
    rules: Arc<RwLock<Vec<(String, MockResponse)>>>,
    /// Responses consumed in order by calls that match no rule.
    queue: Arc<RwLock<VecDeque<MockResponse>>>,
    /// Captured calls for verification.
    captured_calls: Arc<RwLock<Vec<CapturedCall>>>,
    /// Fault raised for every call, if set.
    fault: Arc<RwLock<Option<SimulatedFault>>>,
}

impl MockRunner {
    /// Create a new mock runner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond with `response` to every command line starting with `prefix`.
    pub fn on(self, prefix: impl Into<String>, response: MockResponse) -> Self {
        self.rules.write().push((prefix.into(), response));
        self
    }

    /// Queue a response for the next call that matches no rule.
    pub fn add_response(self, response: MockResponse) -> Self {
        self.queue.write().push_back(response);
        self
    }

    /// Raise `fault` on every call.
    pub fn simulate_fault(self, fault: SimulatedFault) -> Self {
        *self.fault.write() = Some(fault);
        self
    }

    /// Clear all captured calls.
    pub fn clear_calls(&self) {
        self.captured_calls.write().clear();
    }

    /// Get all captured calls.
    pub fn get_calls(&self) -> Vec<CapturedCall> {
        self.captured_calls.read().clone()
    }

    /// Command lines of all captured calls, in call order.
    pub fn command_lines(&self) -> Vec<String> {
        self.captured_calls
            .read()
            .iter()
            .map(CapturedCall::command_line)
            .collect()
    }

    /// Get the number of calls made.
    pub fn call_count(&self) -> usize {
        self.captured_calls.read().len()
    }

    /// Check if any command line starting with `prefix` was run.
    pub fn was_called(&self, prefix: &str) -> bool {
        self.captured_calls
            .read()
            .iter()
            .any(|c| c.command_line().starts_with(prefix))
    }

    fn next_response(&self, line: &str) -> MockResponse {
        if let Some((_, response)) = self
            .rules
            .read()
            .iter()
            .find(|(prefix, _)| line.starts_with(prefix.as_str()))
        {
            return response.clone();
        }
        self.queue
            .write()
            .pop_front()
            .unwrap_or_else(|| MockResponse::success(""))
    }
}

#[async_trait]
impl ToolRunner for MockRunner {
    async fn run(&self, command: &ToolCommand, working_dir: &Path) -> RunnerResult<ExecutionResult> {
        self.captured_calls.write().push(CapturedCall {
            command: command.clone(),
            working_dir: working_dir.to_path_buf(),
        });

        let line = command.to_string();
        let fault = self.fault.read().clone();

        match fault {
            Some(SimulatedFault::Unavailable) => {
                return Err(RunnerError::ToolUnavailable(command.program.clone()))
            }
            Some(SimulatedFault::Timeout(seconds)) => {
                return Err(RunnerError::Timeout {
                    command: line,
                    seconds,
                })
            }
            None => {}
        }

        let response = self.next_response(&line);
        let started_at = Utc::now();
        let finished_at = started_at + chrono::Duration::milliseconds(response.duration_ms as i64);

        Ok(ExecutionResult {
            command: line,
            exit_code: response.exit_code,
            stdout: response.stdout,
            stderr: response.stderr,
            started_at,
            finished_at,
            duration_ms: response.duration_ms,
        })
    }
}
