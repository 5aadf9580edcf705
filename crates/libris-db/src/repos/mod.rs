//! Repository modules implementing the SQL for every library table.
//!
//! Each module adds methods to `LibraryService` via `impl LibraryService` blocks.

pub mod admin;
pub mod author;
pub mod book;
pub mod category;
pub mod issued;
pub mod student;

use libris_auth::{AuthError, verify_password};
use tracing::warn;

/// Compare a password against a stored hash, treating an unreadable hash as
/// a mismatch.
pub(crate) fn password_matches(password: &str, stored_hash: &str) -> bool {
    match verify_password(password, stored_hash) {
        Ok(matches) => matches,
        Err(AuthError::Verify(reason)) => {
            warn!(%reason, "stored password hash is not bcrypt; treating as mismatch");
            false
        }
        Err(e) => {
            warn!(error = %e, "password verification failed");
            false
        }
    }
}
