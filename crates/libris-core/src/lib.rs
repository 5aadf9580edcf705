//! # libris-core
//!
//! Core types shared across all Libris crates:
//! - Entity structs for every table of the library schema
//! - Active/returned status flags and their integer encoding
//! - The table catalog used by bootstrap and reset code
//! - Page request/response types for paginated listings
//! - Input validation for student registration and profile edits
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod pagination;
pub mod validation;
