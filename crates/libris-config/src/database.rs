//! Database location configuration.

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    "library.db".into()
}

fn default_test_path() -> String {
    "library_test.db".into()
}

const fn default_foreign_keys() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path of the application database file.
    #[serde(default = "default_path")]
    pub path: String,

    /// Path of the shared test database that `reset` and `seed` operate on.
    #[serde(default = "default_test_path")]
    pub test_path: String,

    /// Whether to enable `PRAGMA foreign_keys` on open.
    #[serde(default = "default_foreign_keys")]
    pub foreign_keys: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            test_path: default_test_path(),
            foreign_keys: default_foreign_keys(),
        }
    }
}
