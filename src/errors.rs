//! # Error Types Module
//!
//! This module defines the error types surfaced by the cooking assistant core.
//! Empty results (no matching recipe, an exhausted menu pool) and unparseable
//! quantity text are deliberately *not* errors and never show up here.

use thiserror::Error;

/// Errors returned by catalog, recommendation, scaling and menu operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssistantError {
    /// Malformed caller input (serving counts, result limits, config values)
    #[error("Validation error: {0}")]
    Validation(String),
    /// A recipe name that is not present in the catalog
    #[error("Recipe not found: {0}")]
    NotFound(String),
    /// The catalog provider could not produce a catalog
    #[error("Catalog error: {0}")]
    Catalog(String),
}

impl AssistantError {
    /// Shorthand for building a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        AssistantError::Validation(msg.into())
    }

    /// Whether the error was caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        matches!(self, AssistantError::Validation(_) | AssistantError::NotFound(_))
    }
}

impl From<anyhow::Error> for AssistantError {
    fn from(err: anyhow::Error) -> Self {
        AssistantError::Catalog(format!("{err:#}"))
    }
}

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, AssistantError>;
