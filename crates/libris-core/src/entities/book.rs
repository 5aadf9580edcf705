use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A row of `tblbooks`.
///
/// `isbn` is free text: the legacy application stores whatever was typed,
/// digits or not.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    pub id: i64,
    pub name: String,
    pub category_id: Option<i64>,
    pub author_id: Option<i64>,
    pub isbn: Option<String>,
    pub price: Option<f64>,
    pub registered_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A book joined with its category and author names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookDetail {
    #[serde(flatten)]
    pub book: Book,
    pub category_name: String,
    pub author_name: String,
}
