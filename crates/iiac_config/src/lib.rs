//! # iiac_config
//!
//! Configuration document loading for IntelligentIaC.
//!
//! A configuration document declares the cloud provider, the target region
//! and a `resources` mapping of toggles and sizing parameters. This crate
//! reads the document (JSON or YAML), checks the required keys and the
//! provider, and hands back a typed [`Configuration`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use iiac_config::ConfigLoader;
//!
//! let config = ConfigLoader::load("demos/input_aws.json").unwrap();
//! assert!(config.resources.flag("s3", true));
//! ```

pub mod error;
pub mod loader;
pub mod models;
pub mod provider;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigFormat, ConfigLoader, REQUIRED_FIELDS};
pub use models::{Configuration, Resources};
pub use provider::CloudProvider;
