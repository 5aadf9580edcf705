//! Row-to-entity parsing helpers.
//!
//! Timestamps arrive in two shapes: `SQLite`'s `datetime('now')` column
//! defaults and the RFC 3339 strings written from Rust. Numeric money columns
//! may hold either INTEGER or REAL values depending on how they were bound.

use chrono::{DateTime, Utc};

use crate::error::DatabaseError;

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00+00:00"`) and `SQLite`'s default
/// format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse an optional TEXT column as `Option<DateTime<Utc>>`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string cannot be parsed.
pub fn parse_optional_datetime(s: Option<&str>) -> Result<Option<DateTime<Utc>>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => Ok(Some(parse_datetime(s)?)),
        _ => Ok(None),
    }
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Read a nullable TEXT column without collapsing `""` to `None`.
///
/// Book names may legitimately be empty.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_string_or_empty(row: &libsql::Row, idx: i32) -> Result<String, DatabaseError> {
    Ok(row.get::<Option<String>>(idx)?.unwrap_or_default())
}

/// Read a nullable numeric column as `f64`, accepting INTEGER or REAL storage.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the column holds text or a blob.
#[allow(clippy::cast_precision_loss)]
pub fn get_opt_f64(row: &libsql::Row, idx: i32) -> Result<Option<f64>, DatabaseError> {
    match row.get_value(idx)? {
        libsql::Value::Null => Ok(None),
        libsql::Value::Integer(i) => Ok(Some(i as f64)),
        libsql::Value::Real(f) => Ok(Some(f)),
        other => Err(DatabaseError::Query(format!(
            "column {idx}: expected a number, got {other:?}"
        ))),
    }
}

/// Read a non-negative `COUNT(*)`-style column.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` for a negative value.
pub fn get_count(row: &libsql::Row, idx: i32) -> Result<u64, DatabaseError> {
    let n = row.get::<i64>(idx)?;
    u64::try_from(n).map_err(|_| DatabaseError::InvalidState(format!("negative count {n}")))
}

/// `LIKE ?n ESCAPE '\'` pattern matching values that start with `prefix` literally.
#[must_use]
pub fn prefix_pattern(prefix: &str) -> String {
    format!("{}%", libris_core::validation::escape_like(prefix))
}
