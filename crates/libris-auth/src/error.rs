use thiserror::Error;

use crate::policy::PolicyViolation;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("failed to hash password: {0}")]
    Hash(String),

    #[error("failed to verify password: {0}")]
    Verify(String),

    #[error("bcrypt cost {0} is outside 4..=31")]
    InvalidCost(u32),

    #[error("password does not meet policy: {}", describe(.0))]
    WeakPassword(Vec<PolicyViolation>),

    #[error("new password and confirmation do not match")]
    ConfirmationMismatch,

    #[error("current password is incorrect")]
    IncorrectPassword,
}

fn describe(violations: &[PolicyViolation]) -> String {
    violations
        .iter()
        .map(PolicyViolation::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
