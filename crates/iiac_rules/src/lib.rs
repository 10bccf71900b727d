//! # iiac_rules
//!
//! The resolution engine: turns a validated [`Configuration`] into a
//! [`ResolutionPlan`] naming the template set, the ordered list of modules
//! to render and the variables to render them with.
//!
//! Resolution is a pure function. It performs no I/O, and resolving the same
//! configuration twice yields equal plans.
//!
//! ## Example
//!
//! ```rust
//! use iiac_config::Configuration;
//! use iiac_rules::{resolve, ModuleId};
//!
//! let config = Configuration::new("aws", "us-east-1").with_resource("rds", true);
//! let plan = resolve(&config, None).unwrap();
//!
//! assert_eq!(
//!     plan.modules,
//!     vec![ModuleId::Vpc, ModuleId::Ec2, ModuleId::Iam, ModuleId::S3, ModuleId::Alb, ModuleId::Rds]
//! );
//! ```
//!
//! [`Configuration`]: iiac_config::Configuration

pub mod engine;
pub mod error;
pub mod module;
pub mod variables;

pub use engine::{resolve, ResolutionPlan, DEFAULT_ENVIRONMENT, PROJECT_TAG};
pub use error::{ResolveError, ResolveResult};
pub use module::{ModuleId, OptionalModule, BASE_MODULES, OPTIONAL_MODULES};
pub use variables::Variables;
