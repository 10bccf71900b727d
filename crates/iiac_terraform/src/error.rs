//! Error types for IaC generation and validation.

use std::path::PathBuf;

use thiserror::Error;

use iiac_runner::RunnerError;
use iiac_templates::TemplateError;

/// Result type alias for IaC operations.
pub type IacResult<T> = Result<T, IacError>;

/// Errors that can occur during IaC generation or validation.
///
/// A failing `terraform` command is not an error; it is recorded in the
/// [`ValidationReport`](crate::ValidationReport).
#[derive(Error, Debug)]
pub enum IacError {
    #[error("Terraform not available: {0}")]
    ToolUnavailable(String),

    #[error("Terraform command `{command}` timed out after {seconds} seconds")]
    ToolTimeout { command: String, seconds: u64 },

    #[error("Output directory not found: {0}")]
    OutputDirNotFound(PathBuf),

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Runner error: {0}")]
    Runner(RunnerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IacError {
    /// Whether the checker itself could not run, as opposed to the
    /// infrastructure being invalid.
    pub fn is_tool_fault(&self) -> bool {
        matches!(
            self,
            IacError::ToolUnavailable(_) | IacError::ToolTimeout { .. } | IacError::Runner(_)
        )
    }
}

impl From<RunnerError> for IacError {
    fn from(err: RunnerError) -> Self {
        match err {
            RunnerError::ToolUnavailable(program) => IacError::ToolUnavailable(program),
            RunnerError::Timeout { command, seconds } => IacError::ToolTimeout { command, seconds },
            RunnerError::InvalidWorkingDir(dir) => IacError::OutputDirNotFound(dir),
            RunnerError::Io(e) => IacError::Io(e),
            other => IacError::Runner(other),
        }
    }
}
