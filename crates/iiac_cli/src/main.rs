//! IntelligentIaC CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Configuration error
//! - 3: Validation failure
//! - 4: Template error
//! - 5: Terraform unavailable or timed out

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use iiac_config::ConfigError;
use iiac_rules::ResolveError;
use iiac_runner::RunnerError;
use iiac_templates::TemplateError;
use iiac_terraform::IacError;

mod commands;

use commands::{Cli, Commands, ValidationFailed};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const CONFIG_ERROR: u8 = 2;
    pub const VALIDATION_FAILURE: u8 = 3;
    pub const TEMPLATE_ERROR: u8 = 4;
    pub const TOOL_ERROR: u8 = 5;
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Generate(args) => commands::generate::execute(args, &cli).await,
        Commands::Plan(args) => commands::plan::execute(args).await,
        Commands::Validate(args) => commands::validate::execute(args, &cli).await,
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            // The validation transcript has already been printed.
            if exit_code != ExitCodes::VALIDATION_FAILURE {
                eprintln!("❌ Error: {:#}", e);
            }
            ExitCode::from(exit_code)
        }
    }
}

/// Log to stderr so that reports on stdout stay machine-readable.
fn init_logging(verbose: bool, quiet: bool) {
    let default_directives = if verbose {
        "iiac=debug,warn"
    } else if quiet {
        "warn"
    } else {
        "iiac=info,warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    if log_result.is_err() {
        // A global subscriber is already set; keep logging through it
    }
}

/// Pick the exit code from the first typed error in the chain.
fn categorize_error(e: &anyhow::Error) -> u8 {
    for cause in e.chain() {
        if cause.downcast_ref::<ValidationFailed>().is_some() {
            return ExitCodes::VALIDATION_FAILURE;
        }
        if cause.downcast_ref::<ConfigError>().is_some() || cause.downcast_ref::<ResolveError>().is_some() {
            return ExitCodes::CONFIG_ERROR;
        }
        if cause.downcast_ref::<TemplateError>().is_some() {
            return ExitCodes::TEMPLATE_ERROR;
        }
        if let Some(err) = cause.downcast_ref::<IacError>() {
            return match err {
                IacError::Template(_) => ExitCodes::TEMPLATE_ERROR,
                err if err.is_tool_fault() => ExitCodes::TOOL_ERROR,
                _ => ExitCodes::GENERAL_ERROR,
            };
        }
        if let Some(RunnerError::ToolUnavailable(_) | RunnerError::Timeout { .. }) = cause.downcast_ref::<RunnerError>() {
            return ExitCodes::TOOL_ERROR;
        }
    }
    ExitCodes::GENERAL_ERROR
}
