//! Error types for module resolution.

use thiserror::Error;

/// Result type alias for resolution operations.
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Errors that can occur while resolving a configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The requested service is a known module but the configuration does
    /// not enable it.
    #[error("Service not available in this configuration: {0}")]
    UnavailableService(String),

    /// The requested service is not a module identifier at all.
    #[error("Unknown service: {0}")]
    UnknownService(String),
}

impl ResolveError {
    /// The service named by the failed selection.
    pub fn service(&self) -> &str {
        match self {
            ResolveError::UnavailableService(s) | ResolveError::UnknownService(s) => s,
        }
    }
}
