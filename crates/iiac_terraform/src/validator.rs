//! Terraform validation of a generated output directory.

use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use iiac_runner::ExecutionResult;

use crate::error::{IacError, IacResult};
use crate::terraform::{Terraform, ValidationStep};

/// Runs the validation commands against an output directory.
pub struct TerraformValidator {
    terraform: Terraform,
}

impl TerraformValidator {
    pub fn new(terraform: Terraform) -> Self {
        Self { terraform }
    }

    /// Run `fmt -check`, `init -backend=false` and `validate` in order,
    /// stopping at the first command that exits non-zero.
    ///
    /// A failing command is recorded in the report. Errors are reserved for
    /// faults that kept a command from running at all.
    pub async fn validate(&self, output_dir: &Path) -> IacResult<ValidationReport> {
        info!("Validating Terraform in {:?}", output_dir);

        if !output_dir.is_dir() {
            return Err(IacError::OutputDirNotFound(output_dir.to_path_buf()));
        }

        let mut report = ValidationReport::new();
        for step in ValidationStep::ALL {
            let result = self.terraform.run_step(step, output_dir).await?;
            let succeeded = result.success();
            report.add_check(step, result);

            if !succeeded {
                warn!("terraform {} failed; skipping remaining checks", step);
                break;
            }
        }

        info!(
            "Validation {}",
            if report.passed() { "passed" } else { "failed" }
        );
        Ok(report)
    }
}

/// Ordered outcomes of the validation commands that were run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub checks: Vec<ValidationCheck>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_check(&mut self, step: ValidationStep, result: ExecutionResult) {
        self.checks.push(ValidationCheck {
            step,
            command: result.command,
            exit_code: result.exit_code,
            stdout: result.stdout,
            stderr: result.stderr,
            duration_ms: result.duration_ms,
        });
    }

    /// True only when every validation command ran and exited 0.
    pub fn passed(&self) -> bool {
        self.checks.len() == ValidationStep::ALL.len() && self.checks.iter().all(|c| c.passed())
    }

    /// The check that stopped validation, if any.
    pub fn failed_check(&self) -> Option<&ValidationCheck> {
        self.checks.iter().find(|c| !c.passed())
    }

    pub fn last(&self) -> Option<&ValidationCheck> {
        self.checks.last()
    }
}

/// Outcome of one validation command.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationCheck {
    pub step: ValidationStep,
    pub command: String,
    pub exit_code: i64,
    pub stdout: String,
    pub stderr: String,
    pub duration_ms: u64,
}

impl ValidationCheck {
    pub fn passed(&self) -> bool {
        self.exit_code == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iiac_runner::{MockResponse, MockRunner, SimulatedFault};
    use std::sync::Arc;
    use tempfile::tempdir;

    use crate::terraform::TerraformOptions;

    fn validator(runner: &MockRunner) -> TerraformValidator {
        TerraformValidator::new(Terraform::new(Arc::new(runner.clone()), TerraformOptions::default()))
    }

    #[tokio::test]
    async fn test_all_checks_pass() {
        let temp = tempdir().unwrap();
        let runner = MockRunner::new().on(
            "terraform validate",
            MockResponse::success("Success! The configuration is valid."),
        );

        let report = validator(&runner).validate(temp.path()).await.unwrap();

        assert!(report.passed());
        assert!(report.failed_check().is_none());
        assert_eq!(
            runner.command_lines(),
            vec![
                "terraform fmt -check".to_string(),
                "terraform init -backend=false".to_string(),
                "terraform validate".to_string(),
            ]
        );
        assert_eq!(report.last().unwrap().stdout, "Success! The configuration is valid.");
        assert!(runner.get_calls().iter().all(|c| c.working_dir == temp.path()));
    }

    #[tokio::test]
    async fn test_format_check_failure_short_circuits() {
        let temp = tempdir().unwrap();
        let runner = MockRunner::new().on("terraform fmt -check", MockResponse::failure(3, "vpc.tf"));

        let report = validator(&runner).validate(temp.path()).await.unwrap();

        assert!(!report.passed());
        assert_eq!(report.checks.len(), 1);
        assert_eq!(report.checks[0].step, ValidationStep::FormatCheck);
        assert_eq!(report.checks[0].stderr, "vpc.tf");
        assert!(!runner.was_called("terraform init"));
        assert!(!runner.was_called("terraform validate"));
    }

    #[tokio::test]
    async fn test_init_failure_stops_before_validate() {
        let temp = tempdir().unwrap();
        let runner = MockRunner::new().on("terraform init", MockResponse::failure(1, "registry unreachable"));

        let report = validator(&runner).validate(temp.path()).await.unwrap();

        assert!(!report.passed());
        assert_eq!(report.failed_check().unwrap().step, ValidationStep::Init);
        assert_eq!(runner.call_count(), 2);
    }

    #[tokio::test]
    async fn test_missing_tool_is_an_error() {
        let temp = tempdir().unwrap();
        let runner = MockRunner::new().simulate_fault(SimulatedFault::Unavailable);

        let err = validator(&runner).validate(temp.path()).await.unwrap_err();

        assert!(matches!(err, IacError::ToolUnavailable(ref p) if p == "terraform"));
        assert!(err.is_tool_fault());
    }

    #[tokio::test]
    async fn test_timeout_is_an_error() {
        let temp = tempdir().unwrap();
        let runner = MockRunner::new().simulate_fault(SimulatedFault::Timeout(5));

        let err = validator(&runner).validate(temp.path()).await.unwrap_err();
        assert!(matches!(err, IacError::ToolTimeout { seconds: 5, .. }));
    }

    #[tokio::test]
    async fn test_missing_output_dir() {
        let temp = tempdir().unwrap();
        let runner = MockRunner::new();

        let err = validator(&runner)
            .validate(&temp.path().join("output"))
            .await
            .unwrap_err();
        assert!(matches!(err, IacError::OutputDirNotFound(_)));
        assert_eq!(runner.call_count(), 0);
    }

    #[test]
    fn test_partial_report_does_not_pass() {
        let mut report = ValidationReport::new();
        report.checks.push(ValidationCheck {
            step: ValidationStep::FormatCheck,
            command: "terraform fmt -check".to_string(),
            exit_code: 0,
            stdout: String::new(),
            stderr: String::new(),
            duration_ms: 0,
        });
        assert!(!report.passed());
        assert!(report.failed_check().is_none());
    }
}
