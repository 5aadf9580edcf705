//! Database error types for libris-db.

use libris_auth::AuthError;
use libris_core::errors::CoreError;
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed or returned data that could not be decoded.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Input rejected before reaching the database.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Password hashing, verification, or policy failure.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<CoreError> for DatabaseError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Validation(msg) => Self::Validation(msg),
            CoreError::InvalidValue { .. } => Self::InvalidState(e.to_string()),
            CoreError::Other(inner) => Self::Other(inner),
        }
    }
}

impl DatabaseError {
    /// Engine text for errors that came back from libSQL.
    fn engine_message(&self) -> Option<String> {
        match self {
            Self::LibSql(e) => Some(e.to_string()),
            Self::Query(msg) => Some(msg.clone()),
            _ => None,
        }
    }

    fn engine_message_contains(&self, needle: &str) -> bool {
        self.engine_message().is_some_and(|m| m.contains(needle))
    }

    /// Any `SQLite` constraint failure (unique, foreign key, check, not null).
    #[must_use]
    pub fn is_constraint_violation(&self) -> bool {
        self.engine_message_contains("constraint failed")
    }

    /// `UNIQUE constraint failed`: duplicate author, category, email, or student id.
    #[must_use]
    pub fn is_unique_violation(&self) -> bool {
        self.engine_message_contains("UNIQUE constraint failed")
    }

    #[must_use]
    pub fn is_foreign_key_violation(&self) -> bool {
        self.engine_message_contains("FOREIGN KEY constraint failed")
    }

    /// `CHECK constraint failed`: over-long text or a non-numeric price.
    #[must_use]
    pub fn is_check_violation(&self) -> bool {
        self.engine_message_contains("CHECK constraint failed")
    }
}
