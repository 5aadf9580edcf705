//! # libris-config
//!
//! Layered configuration loading for Libris using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`LIBRIS_*` prefix, `__` as separator)
//! 2. Project-level `.libris/config.toml`
//! 3. User-level `~/.config/libris/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `LIBRIS_DATABASE__PATH` -> `database.path`,
//! `LIBRIS_AUTH__BCRYPT_COST` -> `auth.bcrypt_cost`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use libris_config::LibrisConfig;
//!
//! let config = LibrisConfig::load_with_dotenv().expect("config");
//! println!("database: {}", config.database.path);
//! ```

mod auth;
mod database;
mod error;
mod library;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use library::LibraryConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LibrisConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub library: LibraryConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

impl LibrisConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source fails to parse or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// Variables already set in the process environment are not overridden.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Dotenv` if `.env` exists but cannot be read or
    /// parsed, otherwise the same errors as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv()?;
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can layer extra providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".libris/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("LIBRIS_").split("__"))
    }

    /// Reject values that parse but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                field: "auth.bcrypt_cost".into(),
                reason: format!("{} is outside 4..=31", self.auth.bcrypt_cost),
            });
        }
        if self.library.default_page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "library.default_page_size".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.library.max_page_size < self.library.default_page_size {
            return Err(ConfigError::InvalidValue {
                field: "library.max_page_size".into(),
                reason: format!(
                    "{} is smaller than default_page_size {}",
                    self.library.max_page_size, self.library.default_page_size
                ),
            });
        }
        if self.database.path.is_empty() {
            return Err(ConfigError::NotConfigured {
                section: "database".into(),
            });
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("libris").join("config.toml"))
    }

    fn load_dotenv() -> Result<(), ConfigError> {
        let env_path = PathBuf::from(".env");
        if !env_path.exists() {
            return Ok(());
        }
        dotenvy::from_path(&env_path).map_err(|source| ConfigError::Dotenv {
            path: env_path,
            source,
        })
    }
}
