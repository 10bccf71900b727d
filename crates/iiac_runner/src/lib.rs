//! # iiac_runner
//!
//! External tool execution for IntelligentIaC.
//!
//! Every call to an external program (here, `terraform`) goes through the
//! [`ToolRunner`] trait: run a command in a working directory and get back
//! its exit status and captured output.
//!
//! # Features
//!
//! - **ProcessRunner**: spawns real processes with an optional timeout
//! - **MockRunner**: scripted responses and call capture for tests
//! - **Distinct faults**: a missing binary or a timeout is an error, a
//!   non-zero exit status is a normal [`ExecutionResult`]
//!
//! # Example
//!
//! ```rust,no_run
//! use iiac_runner::{ProcessRunner, RunnerOptions, ToolCommand, ToolRunner};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let runner = ProcessRunner::new(RunnerOptions::default().timeout(60));
//!     let command = ToolCommand::new("terraform").arg("version");
//!
//!     let result = runner.run(&command, Path::new(".")).await?;
//!     println!("Exit code: {}", result.exit_code);
//!
//!     Ok(())
//! }
//! ```

pub mod command;
pub mod error;
pub mod mock;
pub mod process;
pub mod runner;

pub use command::ToolCommand;
pub use error::{RunnerError, RunnerResult};
pub use mock::{CapturedCall, MockResponse, MockRunner, SimulatedFault};
pub use process::{ProcessRunner, RunnerOptions, DEFAULT_TIMEOUT_SECONDS};
pub use runner::{ExecutionResult, ToolRunner};
