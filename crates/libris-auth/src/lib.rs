//! # libris-auth
//!
//! Credential handling for Libris admins and students.
//!
//! Passwords are stored as bcrypt hashes (`$2b$...`) and checked with a
//! constant-time verify. New passwords must satisfy [`policy::validate`]
//! before they are hashed.

pub mod error;
pub mod password;
pub mod policy;

pub use error::AuthError;
pub use password::{DEFAULT_COST, MIN_COST, hash_password, verify_password};
