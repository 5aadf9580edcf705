//! Cross-cutting error types for Libris.
//!
//! Domain-specific errors (`DatabaseError`, `AuthError`, `ConfigError`) live
//! in their own crates. The CLI converges them through `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any Libris crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Input failed validation before reaching the database.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A stored value could not be mapped onto a typed field.
    #[error("Invalid stored value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
