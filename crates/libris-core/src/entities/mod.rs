//! Entity structs for every table in the library schema.
//!
//! Field names are Rust-side; the legacy column each maps to is noted on the
//! struct. Password hashes are never serialized.

mod admin;
mod author;
mod book;
mod category;
mod issued;
mod student;

pub use admin::Admin;
pub use author::Author;
pub use book::{Book, BookDetail};
pub use category::Category;
pub use issued::{IssuedBook, IssuedBookDetail};
pub use student::Student;
