//! Error types for templates.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Errors that can occur during template operations.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template set not found: {0}")]
    TemplateSetNotFound(PathBuf),

    #[error("Template rendering failed for {template}: {message}")]
    RenderingFailed { template: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TemplateError {
    /// Whether the error means the template simply does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, TemplateError::NotFound(_))
    }
}
