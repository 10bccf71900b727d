//! Tool runner trait and types.

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::command::ToolCommand;
use crate::error::RunnerResult;

/// Result of running an external tool to completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Command line that was run
    pub command: String,
    /// Exit code (-1 when the process was terminated by a signal)
    pub exit_code: i64,
    /// Captured stdout
    pub stdout: String,
    /// Captured stderr
    pub stderr: String,
    /// Execution start time
    pub started_at: DateTime<Utc>,
    /// Execution end time
    pub finished_at: DateTime<Utc>,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl ExecutionResult {
    /// Check if execution was successful (exit code 0).
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Capability to run an external command in a working directory.
///
/// A non-zero exit status is returned as an [`ExecutionResult`]; only faults
/// that keep the tool from running (missing binary, timeout) are errors.
#[async_trait]
pub trait ToolRunner: Send + Sync {
    async fn run(&self, command: &ToolCommand, working_dir: &Path) -> RunnerResult<ExecutionResult>;
}
