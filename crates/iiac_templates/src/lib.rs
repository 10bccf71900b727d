//! # iiac_templates
//!
//! Provider template sets for IntelligentIaC.
//!
//! A template set is one directory per provider (`templates/aws/`) holding
//! Jinja-style templates named `<artifact>.tf.j2`. Templates are rendered
//! with MiniJinja using `trim_blocks` and `lstrip_blocks`, so block tags do
//! not leave stray whitespace in the generated Terraform.
//!
//! ## Example
//!
//! ```rust,no_run
//! use iiac_templates::TemplateSet;
//! use serde_json::json;
//!
//! let set = TemplateSet::open("templates/aws").unwrap();
//! let rendered = set.render("vpc.tf.j2", &json!({"vpc_cidr": "10.0.0.0/16"})).unwrap();
//! ```

pub mod error;
pub mod set;

pub use error::{TemplateError, TemplateResult};
pub use set::{TemplateSet, TEMPLATE_EXTENSION};
