//! CLI command definitions.
//!
//! Each subcommand maps to a stage of the pipeline: `plan` resolves,
//! `generate` resolves, renders and validates, `validate` only validates.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use thiserror::Error;

use iiac_runner::{ProcessRunner, RunnerOptions, DEFAULT_TIMEOUT_SECONDS};
use iiac_terraform::{Terraform, TerraformOptions};

pub mod generate;
pub mod plan;
pub mod validate;

/// Configuration file read when `--config` is not given.
pub const DEFAULT_CONFIG: &str = "demos/input_aws.json";

/// Output directory used when `--out` is not given.
pub const DEFAULT_OUTPUT: &str = "output";

/// IntelligentIaC - Terraform generation from a declarative configuration
#[derive(Parser)]
#[command(name = "iiac")]
#[command(version, about = "IntelligentIaC - Terraform generation from a declarative configuration")]
#[command(long_about = r#"
IntelligentIaC turns a small JSON or YAML infrastructure description into
Terraform files and checks them with the Terraform CLI.

STAGES:
  plan       → Resolve the configuration into modules and variables
  generate   → Render Terraform files, then format-check, init and validate
  validate   → Validate an existing output directory

EXIT CODES:
  0 - Success
  1 - General error
  2 - Configuration error
  3 - Validation failure
  4 - Template error
  5 - Terraform unavailable or timed out
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Terraform binary name or path
    #[arg(long, global = true, env = "IIAC_TERRAFORM", default_value = "terraform")]
    pub terraform: String,

    /// Timeout for each Terraform command in seconds (0 disables)
    #[arg(long, global = true, env = "IIAC_TOOL_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout: u64,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Terraform wrapper backed by real processes.
    pub fn terraform(&self) -> Terraform {
        let runner = ProcessRunner::new(RunnerOptions::new().timeout(self.timeout));
        Terraform::new(
            Arc::new(runner),
            TerraformOptions::default().binary(&self.terraform),
        )
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate and validate Terraform files
    Generate(generate::GenerateArgs),

    /// Print the resolution plan without writing anything
    Plan(plan::PlanArgs),

    /// Validate an existing output directory
    Validate(validate::ValidateArgs),
}

/// Raised after the transcript of a failed validation has been printed.
#[derive(Error, Debug)]
#[error("Terraform validation failed at {step}")]
pub struct ValidationFailed {
    pub step: String,
}
