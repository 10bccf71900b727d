//! Process-based tool runner.

use std::io::ErrorKind;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::command::ToolCommand;
use crate::error::{RunnerError, RunnerResult};
use crate::runner::{ExecutionResult, ToolRunner};

/// Default timeout for a single tool invocation.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 300;

/// Process runner options.
#[derive(Debug, Clone)]
pub struct RunnerOptions {
    /// Timeout in seconds (0 = no timeout)
    pub timeout_seconds: u64,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl RunnerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    pub fn no_timeout(mut self) -> Self {
        self.timeout_seconds = 0;
        self
    }
}

/// Runs tools as child processes.
///
/// The child is killed if the timeout elapses before it exits.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    options: RunnerOptions,
}

impl ProcessRunner {
    pub fn new(options: RunnerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RunnerOptions {
        &self.options
    }
}

#[async_trait]
impl ToolRunner for ProcessRunner {
    async fn run(&self, command: &ToolCommand, working_dir: &Path) -> RunnerResult<ExecutionResult> {
        if !working_dir.is_dir() {
            return Err(RunnerError::InvalidWorkingDir(working_dir.to_path_buf()));
        }

        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!("Executing: {} (in {:?})", command, working_dir);

        let started_at = Utc::now();
        let child = cmd.spawn().map_err(|e| match e.kind() {
            ErrorKind::NotFound => RunnerError::ToolUnavailable(command.program.clone()),
            _ => RunnerError::ExecutionFailed(format!("Failed to spawn {}: {}", command.program, e)),
        })?;

        let output = if self.options.timeout_seconds > 0 {
            let limit = Duration::from_secs(self.options.timeout_seconds);
            match tokio::time::timeout(limit, child.wait_with_output()).await {
                Ok(output) => output?,
                Err(_) => {
                    warn!("{} timed out after {}s", command, self.options.timeout_seconds);
                    return Err(RunnerError::Timeout {
                        command: command.to_string(),
                        seconds: self.options.timeout_seconds,
                    });
                }
            }
        } else {
            child.wait_with_output().await?
        };

        let finished_at = Utc::now();
        let duration_ms = (finished_at - started_at).num_milliseconds().max(0) as u64;
        let exit_code = output.status.code().unwrap_or(-1) as i64;

        debug!("{} exited with {} after {}ms", command, exit_code, duration_ms);

        Ok(ExecutionResult {
            command: command.to_string(),
            exit_code,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            started_at,
            finished_at,
            duration_ms,
        })
    }
}
