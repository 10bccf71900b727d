//! # iiac_terraform
//!
//! Terraform generation and validation for IntelligentIaC.
//!
//! This crate takes a [`ResolutionPlan`], renders its modules and the
//! optional common artifacts into an output directory, formats them with
//! `terraform fmt`, and validates the result with the external toolchain.
//!
//! ## Features
//!
//! - Full regeneration: the output directory is replaced on every run
//! - Best-effort formatting reported as [`StepOutcome`]s
//! - Ordered validation (`fmt -check`, `init -backend=false`, `validate`)
//!   that stops at the first failing command
//! - Tool faults (missing binary, timeout) kept apart from invalid
//!   infrastructure
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! use iiac_config::ConfigLoader;
//! use iiac_rules::resolve;
//! use iiac_runner::{ProcessRunner, RunnerOptions};
//! use iiac_terraform::{IacGenerator, Terraform, TerraformOptions, TerraformValidator};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConfigLoader::load("demos/input_aws.json")?;
//! let plan = resolve(&config, None)?;
//!
//! let runner = Arc::new(ProcessRunner::new(RunnerOptions::default()));
//! let terraform = Terraform::new(runner, TerraformOptions::default());
//!
//! let generator = IacGenerator::new("templates", terraform.clone());
//! generator.generate(&plan, Path::new("output")).await?;
//!
//! let report = TerraformValidator::new(terraform).validate(Path::new("output")).await?;
//! println!("passed: {}", report.passed());
//! # Ok(())
//! # }
//! ```
//!
//! [`ResolutionPlan`]: iiac_rules::ResolutionPlan

pub mod error;
pub mod generator;
pub mod outcome;
pub mod terraform;
pub mod validator;

pub use error::{IacError, IacResult};
pub use generator::{
    list_artifacts, ArtifactKind, ArtifactRecord, GenerationReport, IacGenerator, COMMON_ARTIFACTS,
};
pub use outcome::StepOutcome;
pub use terraform::{Terraform, TerraformOptions, ValidationStep};
pub use validator::{TerraformValidator, ValidationCheck, ValidationReport};
