//! Service layer hosting the repository methods.
//!
//! `LibraryService` wraps `LibraryDb` together with the lending and hashing
//! settings the repositories need. All repo methods are implemented as
//! `impl LibraryService` blocks under `repos/`.

use libris_config::{AuthConfig, LibraryConfig, LibrisConfig};

use crate::LibraryDb;
use crate::error::DatabaseError;

pub struct LibraryService {
    db: LibraryDb,
    library: LibraryConfig,
    auth: AuthConfig,
}

impl LibraryService {
    /// Open the database at `config.database.path` and wrap it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn open(config: &LibrisConfig) -> Result<Self, DatabaseError> {
        Self::open_path(&config.database.path, config).await
    }

    /// Open the database at an explicit path, taking every other setting
    /// from `config`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn open_path(path: &str, config: &LibrisConfig) -> Result<Self, DatabaseError> {
        let db = LibraryDb::open_local_with(path, config.database.foreign_keys).await?;
        Ok(Self::from_db(db, config))
    }

    /// Wrap an already-open database.
    #[must_use]
    pub fn from_db(db: LibraryDb, config: &LibrisConfig) -> Self {
        Self {
            db,
            library: config.library.clone(),
            auth: config.auth.clone(),
        }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &LibraryDb {
        &self.db
    }

    #[must_use]
    pub const fn library(&self) -> &LibraryConfig {
        &self.library
    }

    #[must_use]
    pub const fn auth(&self) -> &AuthConfig {
        &self.auth
    }

    /// Hash a new password at the configured cost.
    pub(crate) fn hash(&self, password: &str) -> Result<String, DatabaseError> {
        Ok(libris_auth::hash_password(password, self.auth.bcrypt_cost)?)
    }
}
