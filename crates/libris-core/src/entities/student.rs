use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::ActiveStatus;

/// A row of `tblstudents`.
///
/// `id` is the row id referenced by issued-book records; `student_id` is the
/// human-facing identifier (`StudentId` column).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Student {
    pub id: i64,
    pub student_id: String,
    pub full_name: String,
    pub email: String,
    pub mobile_number: Option<String>,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub status: ActiveStatus,
    pub registered_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
