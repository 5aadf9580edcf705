//! Lending and listing rules.

use serde::{Deserialize, Serialize};

const fn default_loan_period_days() -> u32 {
    15
}

const fn default_page_size() -> u32 {
    10
}

const fn default_max_page_size() -> u32 {
    100
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibraryConfig {
    /// Days between issue and due date.
    #[serde(default = "default_loan_period_days")]
    pub loan_period_days: u32,

    /// Rows per page when a listing does not ask for a size.
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    /// Upper bound on requested page size.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            loan_period_days: default_loan_period_days(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}
