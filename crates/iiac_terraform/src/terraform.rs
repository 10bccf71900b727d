//! Terraform commands over a [`ToolRunner`].

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use iiac_runner::{ExecutionResult, ToolCommand, ToolRunner};

use crate::error::IacResult;
use crate::outcome::StepOutcome;

/// Terraform invocation options.
#[derive(Debug, Clone)]
pub struct TerraformOptions {
    /// Terraform binary name or path
    pub binary: String,
}

impl Default for TerraformOptions {
    fn default() -> Self {
        Self {
            binary: "terraform".to_string(),
        }
    }
}

impl TerraformOptions {
    pub fn binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }
}

/// The validation commands, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStep {
    FormatCheck,
    Init,
    Validate,
}

impl ValidationStep {
    pub const ALL: [ValidationStep; 3] = [
        ValidationStep::FormatCheck,
        ValidationStep::Init,
        ValidationStep::Validate,
    ];

    /// Terraform arguments for this step.
    pub fn args(&self) -> &'static [&'static str] {
        match self {
            ValidationStep::FormatCheck => &["fmt", "-check"],
            ValidationStep::Init => &["init", "-backend=false"],
            ValidationStep::Validate => &["validate"],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ValidationStep::FormatCheck => "format-check",
            ValidationStep::Init => "init",
            ValidationStep::Validate => "validate",
        }
    }
}

impl fmt::Display for ValidationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Terraform command wrapper.
#[derive(Clone)]
pub struct Terraform {
    runner: Arc<dyn ToolRunner>,
    options: TerraformOptions,
}

impl Terraform {
    pub fn new(runner: Arc<dyn ToolRunner>, options: TerraformOptions) -> Self {
        Self { runner, options }
    }

    pub fn binary(&self) -> &str {
        &self.options.binary
    }

    fn command(&self, args: &[&str]) -> ToolCommand {
        ToolCommand::new(&self.options.binary).args(args.iter().copied())
    }

    /// Run one validation step in `working_dir`.
    pub async fn run_step(&self, step: ValidationStep, working_dir: &Path) -> IacResult<ExecutionResult> {
        info!("Running terraform {} in {:?}", step, working_dir);
        let result = self.runner.run(&self.command(step.args()), working_dir).await?;
        Ok(result)
    }

    /// Format a single file. Never fails; the outcome says what happened.
    pub async fn fmt_file(&self, file: &Path) -> StepOutcome {
        let (dir, name) = match (file.parent(), file.file_name()) {
            (Some(dir), Some(name)) => (dir, name.to_string_lossy()),
            _ => return StepOutcome::Skipped(format!("not a file path: {}", file.display())),
        };
        debug!("Formatting {:?}", file);
        self.best_effort(self.command(&["fmt", name.as_ref()]), dir).await
    }

    /// Format every file in `dir`. Never fails; the outcome says what happened.
    pub async fn fmt_dir(&self, dir: &Path) -> StepOutcome {
        debug!("Formatting directory {:?}", dir);
        self.best_effort(self.command(&["fmt"]), dir).await
    }

    async fn best_effort(&self, command: ToolCommand, working_dir: &Path) -> StepOutcome {
        match self.runner.run(&command, working_dir).await {
            Ok(result) if result.success() => StepOutcome::Done,
            Ok(result) => {
                let reason = format!("`{}` exited with {}", command, result.exit_code);
                warn!("Ignoring formatter failure: {}", reason);
                StepOutcome::FailedIgnored(reason)
            }
            Err(e) => {
                warn!("Ignoring formatter failure: {}", e);
                StepOutcome::FailedIgnored(e.to_string())
            }
        }
    }
}
