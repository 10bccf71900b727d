//! Validate command - Run the Terraform checks on an output directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use iiac_terraform::{Terraform, TerraformValidator, ValidationReport};

use super::{Cli, ValidationFailed, DEFAULT_OUTPUT};

#[derive(Args)]
pub struct ValidateArgs {
    /// Directory holding the generated Terraform files
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    out: PathBuf,
}

pub async fn execute(args: &ValidateArgs, cli: &Cli) -> Result<()> {
    run(&cli.terraform(), &args.out).await
}

/// Validate `dir`, print the transcript, and fail if any check failed.
pub async fn run(terraform: &Terraform, dir: &Path) -> Result<()> {
    info!("Validating {}", dir.display());

    let report = TerraformValidator::new(terraform.clone())
        .validate(dir)
        .await
        .with_context(|| format!("Failed to validate {}", dir.display()))?;

    print_transcript(&report);

    println!();
    if report.passed() {
        println!("✅ Terraform validation passed");
        Ok(())
    } else {
        let step = report
            .failed_check()
            .map(|c| c.step.to_string())
            .unwrap_or_else(|| "unknown step".to_string());
        println!("❌ Terraform validation failed at {}", step);
        Err(ValidationFailed { step }.into())
    }
}

fn print_transcript(report: &ValidationReport) {
    println!("🔍 Validation results:");
    for check in &report.checks {
        println!();
        println!("Command: {}", check.command);
        println!("Return code: {}", check.exit_code);
        println!("Stdout:");
        println!("{}", check.stdout.trim_end());
        println!("Stderr:");
        println!("{}", check.stderr.trim_end());
    }
}
