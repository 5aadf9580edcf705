//! bcrypt hashing and verification.

use bcrypt::{hash, verify};

use crate::error::AuthError;

/// Cost used when configuration does not say otherwise.
pub const DEFAULT_COST: u32 = 10;

/// Cheapest cost bcrypt accepts. Tests use it to keep hashing fast.
pub const MIN_COST: u32 = 4;

const MAX_COST: u32 = 31;

/// Hash `password` with bcrypt at the given cost.
///
/// # Errors
///
/// Returns `AuthError::InvalidCost` for a cost outside `4..=31`, or
/// `AuthError::Hash` if bcrypt fails.
pub fn hash_password(password: &str, cost: u32) -> Result<String, AuthError> {
    if !(MIN_COST..=MAX_COST).contains(&cost) {
        return Err(AuthError::InvalidCost(cost));
    }
    hash(password, cost).map_err(|e| AuthError::Hash(e.to_string()))
}

/// Check `password` against a stored bcrypt hash.
///
/// Returns `Ok(false)` on mismatch.
///
/// # Errors
///
/// Returns `AuthError::Verify` if `stored_hash` is not a bcrypt hash.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AuthError> {
    verify(password, stored_hash).map_err(|e| {
        tracing::debug!(error = %e, "stored hash rejected by bcrypt");
        AuthError::Verify(e.to_string())
    })
}
