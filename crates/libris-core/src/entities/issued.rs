use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::ReturnStatus;

/// A row of `tblissuedbookdetails`.
///
/// `return_date` holds the due date while the book is out and the actual
/// return time once it comes back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IssuedBook {
    pub id: i64,
    pub book_id: i64,
    pub student_id: i64,
    pub issued_at: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub return_status: ReturnStatus,
    pub fine: Option<f64>,
}

/// An issued-book record joined with the book it refers to, as shown on a
/// student's "issued books" page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IssuedBookDetail {
    pub issue_id: i64,
    pub book_name: String,
    pub isbn: Option<String>,
    pub issued_at: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub return_status: ReturnStatus,
    pub fine: Option<f64>,
}
