use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::ActiveStatus;

/// A row of `tblcategory`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub status: ActiveStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
