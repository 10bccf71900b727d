//! Error types for the runner module.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for runner operations.
pub type RunnerResult<T> = Result<T, RunnerError>;

/// Faults that prevented a tool from producing an exit status.
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Tool not available: {0}")]
    ToolUnavailable(String),

    #[error("Command `{command}` timed out after {seconds} seconds")]
    Timeout { command: String, seconds: u64 },

    #[error("Working directory does not exist: {0}")]
    InvalidWorkingDir(PathBuf),

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
