//! Password strength policy.
//!
//! A password must be 8 to 20 characters drawn from letters, digits, and
//! `@$!%*?&`, and contain at least one of each: lowercase letter, uppercase
//! letter, digit, special character.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::AuthError;

pub const MIN_LEN: usize = 8;
pub const MAX_LEN: usize = 20;
pub const SPECIAL_CHARS: &str = "@$!%*?&";

static ALLOWED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9@$!%*?&]*$").unwrap_or_else(|e| panic!("password charset regex: {e}"))
});

/// One way a password can fail the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyViolation {
    TooShort,
    TooLong,
    DisallowedCharacter,
    MissingLowercase,
    MissingUppercase,
    MissingDigit,
    MissingSpecial,
}

impl PolicyViolation {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TooShort => "shorter than 8 characters",
            Self::TooLong => "longer than 20 characters",
            Self::DisallowedCharacter => "contains a character outside letters, digits, and @$!%*?&",
            Self::MissingLowercase => "no lowercase letter",
            Self::MissingUppercase => "no uppercase letter",
            Self::MissingDigit => "no digit",
            Self::MissingSpecial => "no special character",
        }
    }
}

impl fmt::Display for PolicyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every rule `password` breaks, in a stable order. Empty means it passes.
#[must_use]
pub fn violations(password: &str) -> Vec<PolicyViolation> {
    let mut out = Vec::new();
    let len = password.chars().count();
    if len < MIN_LEN {
        out.push(PolicyViolation::TooShort);
    }
    if len > MAX_LEN {
        out.push(PolicyViolation::TooLong);
    }
    if !ALLOWED.is_match(password) {
        out.push(PolicyViolation::DisallowedCharacter);
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        out.push(PolicyViolation::MissingLowercase);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        out.push(PolicyViolation::MissingUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        out.push(PolicyViolation::MissingDigit);
    }
    if !password.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        out.push(PolicyViolation::MissingSpecial);
    }
    out
}

/// Whether `password` satisfies the policy.
#[must_use]
pub fn is_strong(password: &str) -> bool {
    violations(password).is_empty()
}

/// Validate `password` against the policy.
///
/// # Errors
///
/// Returns `AuthError::WeakPassword` listing every violated rule.
pub fn validate(password: &str) -> Result<(), AuthError> {
    let found = violations(password);
    if found.is_empty() {
        Ok(())
    } else {
        Err(AuthError::WeakPassword(found))
    }
}

/// Validate a new password and its confirmation field.
///
/// # Errors
///
/// Returns `AuthError::ConfirmationMismatch` if the two differ, otherwise
/// whatever [`validate`] returns.
pub fn validate_new_password(new: &str, confirm: &str) -> Result<(), AuthError> {
    if new != confirm {
        return Err(AuthError::ConfirmationMismatch);
    }
    validate(new)
}
