use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A row of `admin`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Admin {
    pub id: i64,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub updated_at: Option<DateTime<Utc>>,
}
