//! Input checks applied before a student row is written.
//!
//! The schema only enforces lengths and uniqueness; these checks reject the
//! malformed sign-up input the web forms are expected to catch.

use crate::errors::CoreError;

/// Column limits from the legacy schema.
pub const MAX_STUDENT_ID_LEN: usize = 100;
pub const MAX_FULL_NAME_LEN: usize = 120;
pub const MAX_EMAIL_LEN: usize = 120;
pub const MAX_AUTHOR_NAME_LEN: usize = 159;
pub const MAX_CATEGORY_NAME_LEN: usize = 150;
pub const MAX_BOOK_NAME_LEN: usize = 255;

/// Validate an email address of the shape `local@domain.tld`.
///
/// # Errors
///
/// Returns `CoreError::Validation` describing the first problem found.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.is_empty() {
        return Err(CoreError::Validation("email cannot be empty".into()));
    }
    if email.len() > MAX_EMAIL_LEN {
        return Err(CoreError::Validation(format!(
            "email exceeds {MAX_EMAIL_LEN} characters"
        )));
    }
    if email.chars().any(char::is_whitespace) {
        return Err(CoreError::Validation(format!(
            "email '{email}' contains whitespace"
        )));
    }
    let Some((local, domain)) = email.split_once('@') else {
        return Err(CoreError::Validation(format!("email '{email}' has no '@'")));
    };
    let domain_ok = !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|part| !part.is_empty());
    if local.is_empty() || !domain_ok {
        return Err(CoreError::Validation(format!(
            "email '{email}' is not a valid address"
        )));
    }
    Ok(())
}

/// Validate a mobile number: 10 or 11 ASCII digits.
///
/// # Errors
///
/// Returns `CoreError::Validation` if the number has other characters or the
/// wrong length.
pub fn validate_mobile_number(mobile: &str) -> Result<(), CoreError> {
    if !mobile.chars().all(|c| c.is_ascii_digit()) {
        return Err(CoreError::Validation(format!(
            "mobile number '{mobile}' must contain digits only"
        )));
    }
    if !(10..=11).contains(&mobile.len()) {
        return Err(CoreError::Validation(format!(
            "mobile number must be 10 or 11 digits, got {}",
            mobile.len()
        )));
    }
    Ok(())
}

/// Validate a student's full name.
///
/// # Errors
///
/// Returns `CoreError::Validation` if the name is blank or too long.
pub fn validate_full_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("full name cannot be empty".into()));
    }
    if name.chars().count() > MAX_FULL_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "full name exceeds {MAX_FULL_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a student identifier.
///
/// # Errors
///
/// Returns `CoreError::Validation` if the id is blank or too long.
pub fn validate_student_id(student_id: &str) -> Result<(), CoreError> {
    if student_id.trim().is_empty() {
        return Err(CoreError::Validation("student id cannot be empty".into()));
    }
    if student_id.len() > MAX_STUDENT_ID_LEN {
        return Err(CoreError::Validation(format!(
            "student id exceeds {MAX_STUDENT_ID_LEN} characters"
        )));
    }
    Ok(())
}

/// Escape `%`, `_`, and `\` so `value` matches literally inside a
/// `LIKE ... ESCAPE '\'` pattern.
#[must_use]
pub fn escape_like(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("test@example.com")]
    #[case("student1@Test_abc_example.com")]
    #[case("a.b@c.d")]
    fn accepts_well_formed_email(#[case] email: &str) {
        assert!(validate_email(email).is_ok(), "{email} should be valid");
    }

    #[rstest]
    #[case("")]
    #[case("useratexample.com")]
    #[case("invalid-email")]
    #[case("@example.com")]
    #[case("user@example")]
    #[case("user@.com")]
    #[case("user@@example.com")]
    #[case("us er@example.com")]
    fn rejects_malformed_email(#[case] email: &str) {
        assert!(validate_email(email).is_err(), "{email} should be invalid");
    }

    #[rstest]
    #[case("1234567890", true)]
    #[case("98765432101", true)]
    #[case("abc123", false)]
    #[case("12345", false)]
    #[case("123456789012", false)]
    fn mobile_number_rules(#[case] mobile: &str, #[case] ok: bool) {
        assert_eq!(validate_mobile_number(mobile).is_ok(), ok);
    }

    #[test]
    fn empty_full_name_is_rejected() {
        assert!(validate_full_name("   ").is_err());
        assert!(validate_full_name("Test Student").is_ok());
        assert!(validate_full_name(&"x".repeat(121)).is_err());
    }

    #[test]
    fn student_id_limits() {
        assert!(validate_student_id("STD001").is_ok());
        assert!(validate_student_id("").is_err());
        assert!(validate_student_id(&"S".repeat(101)).is_err());
    }

    #[test]
    fn escape_like_escapes_wildcards() {
        assert_eq!(escape_like("Test_1%"), "Test\\_1\\%");
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }
}
