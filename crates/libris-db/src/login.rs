//! Result of a credential check.

use serde::Serialize;

/// How a login attempt ended.
///
/// The web forms show one generic message for every failure; the variants
/// exist so tests and the CLI can tell them apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "account", rename_all = "snake_case")]
pub enum LoginOutcome<T> {
    Success(T),
    /// No account matches the username or email.
    UnknownAccount,
    WrongPassword,
    /// Credentials match but the account is blocked.
    Inactive,
}

impl<T> LoginOutcome<T> {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The account on success.
    #[must_use]
    pub fn into_account(self) -> Option<T> {
        match self {
            Self::Success(account) => Some(account),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_success_is_success() {
        assert!(LoginOutcome::Success(1).is_success());
        assert!(!LoginOutcome::<i32>::UnknownAccount.is_success());
        assert!(!LoginOutcome::<i32>::WrongPassword.is_success());
        assert!(!LoginOutcome::<i32>::Inactive.is_success());
    }

    #[test]
    fn serializes_with_outcome_tag() {
        let json = serde_json::to_value(LoginOutcome::<i32>::Inactive).unwrap();
        assert_eq!(json["outcome"], "inactive");
        assert_eq!(LoginOutcome::Success(7).into_account(), Some(7));
    }
}
