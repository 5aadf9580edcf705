//! # libris-db
//!
//! libSQL storage for the library schema: admins, authors, categories,
//! books, students, and issued-book records.
//!
//! [`LibraryDb`] is the long-lived connection holder. It owns one connection,
//! tracks whether a transaction is open, and hosts the bootstrap operations
//! (migrate, seed, truncate, reset) used to prepare a shared test database.
//! [`service::LibraryService`] layers typed repository methods on top.

pub mod bootstrap;
pub mod error;
pub mod helpers;
pub mod login;
mod migrations;
pub mod repos;
pub mod service;
pub mod updates;

#[cfg(test)]
mod test_support;

use std::sync::atomic::{AtomicBool, Ordering};

use error::DatabaseError;
use libsql::Builder;
use tracing::{debug, warn};

/// Central database handle for all library state.
///
/// Wraps a libSQL database and a single connection. At most one transaction
/// is open at a time; `begin`, `commit`, and `rollback` are no-ops when the
/// current state makes them meaningless.
pub struct LibraryDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    in_transaction: AtomicBool,
    foreign_keys: bool,
}

impl LibraryDb {
    /// Open a local database at the given path with foreign keys enforced.
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        Self::open_local_with(path, true).await
    }

    /// Open a local database, choosing whether `PRAGMA foreign_keys` is on.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local_with(path: &str, foreign_keys: bool) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        let library_db = Self {
            db,
            conn,
            in_transaction: AtomicBool::new(false),
            foreign_keys,
        };
        // Per-connection in SQLite.
        library_db
            .set_foreign_keys(foreign_keys)
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;
        library_db.run_migrations().await?;
        debug!(path, foreign_keys, "opened library database");
        Ok(library_db)
    }

    /// Open a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if migrations fail.
    pub async fn open_in_memory() -> Result<Self, DatabaseError> {
        Self::open_local(":memory:").await
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Prepare a statement on the shared connection.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::LibSql` if the SQL does not compile.
    pub async fn prepare(&self, sql: &str) -> Result<libsql::Statement, DatabaseError> {
        Ok(self.conn.prepare(sql).await?)
    }

    /// Run a parameterless statement and return the affected row count.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::LibSql` if the statement fails.
    pub async fn exec(&self, sql: &str) -> Result<u64, DatabaseError> {
        Ok(self.conn.execute(sql, ()).await?)
    }

    /// Run a statement with parameters and return the affected row count.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::LibSql` if the statement fails.
    pub async fn execute(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
    ) -> Result<u64, DatabaseError> {
        Ok(self.conn.execute(sql, params).await?)
    }

    /// Row id of the most recent successful INSERT on this connection.
    #[must_use]
    pub fn last_insert_id(&self) -> i64 {
        self.conn.last_insert_rowid()
    }

    // -----------------------------------------------------------------------
    // Transactions
    // -----------------------------------------------------------------------

    /// Open a transaction unless one is already open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if `BEGIN` fails.
    pub async fn begin_transaction(&self) -> Result<(), DatabaseError> {
        if self.is_in_transaction() {
            return Ok(());
        }
        self.conn.execute("BEGIN", ()).await?;
        self.in_transaction.store(true, Ordering::SeqCst);
        Ok(())
    }

    /// Commit the open transaction. No-op when none is open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if `COMMIT` fails; the transaction stays open.
    pub async fn commit_transaction(&self) -> Result<(), DatabaseError> {
        if !self.is_in_transaction() {
            return Ok(());
        }
        self.conn.execute("COMMIT", ()).await?;
        self.in_transaction.store(false, Ordering::SeqCst);
        Ok(())
    }

    /// Roll back the open transaction. No-op when none is open.
    ///
    /// A failed rollback is logged and the handle is marked as outside a
    /// transaction either way.
    pub async fn rollback_transaction(&self) {
        if !self.in_transaction.swap(false, Ordering::SeqCst) {
            return;
        }
        if let Err(e) = self.conn.execute("ROLLBACK", ()).await {
            warn!(error = %e, "rollback failed");
        }
    }

    #[must_use]
    pub fn is_in_transaction(&self) -> bool {
        self.in_transaction.load(Ordering::SeqCst)
    }

    // -----------------------------------------------------------------------
    // Foreign keys and catalog
    // -----------------------------------------------------------------------

    /// Turn `PRAGMA foreign_keys` on or off.
    ///
    /// `SQLite` ignores this inside a transaction.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the pragma fails.
    pub async fn set_foreign_keys(&self, enabled: bool) -> Result<(), DatabaseError> {
        let sql = if enabled {
            "PRAGMA foreign_keys = ON"
        } else {
            "PRAGMA foreign_keys = OFF"
        };
        self.conn.execute(sql, ()).await?;
        Ok(())
    }

    /// Current value of `PRAGMA foreign_keys`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the pragma cannot be read.
    pub async fn foreign_keys_enabled(&self) -> Result<bool, DatabaseError> {
        let mut rows = self.conn.query("PRAGMA foreign_keys", ()).await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<i64>(0)? == 1)
    }

    /// Names of all user tables, sorted.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if `sqlite_master` cannot be read.
    pub async fn existing_tables(&self) -> Result<Vec<String>, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                "SELECT name FROM sqlite_master \
                 WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
                (),
            )
            .await?;
        let mut names = Vec::new();
        while let Some(row) = rows.next().await? {
            names.push(row.get::<String>(0)?);
        }
        Ok(names)
    }

    /// Whether a table with this exact name exists.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if `sqlite_master` cannot be read.
    pub async fn table_exists(&self, name: &str) -> Result<bool, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [name],
            )
            .await?;
        Ok(rows.next().await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libris_core::enums::Table;
    use pretty_assertions::assert_eq;

    async fn test_db() -> LibraryDb {
        LibraryDb::open_in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn open_creates_every_table() {
        let db = test_db().await;
        for table in Table::ALL {
            assert!(
                db.table_exists(table.as_str()).await.unwrap(),
                "table '{table}' should exist"
            );
        }
    }

    #[tokio::test]
    async fn existing_tables_lists_schema() {
        let db = test_db().await;
        let tables = db.existing_tables().await.unwrap();
        assert_eq!(
            tables,
            vec![
                "admin",
                "tblauthors",
                "tblbooks",
                "tblcategory",
                "tblissuedbookdetails",
                "tblstudents",
            ]
        );
    }

    #[tokio::test]
    async fn foreign_keys_are_on_after_open() {
        let db = test_db().await;
        assert!(db.foreign_keys_enabled().await.unwrap());
        db.set_foreign_keys(false).await.unwrap();
        assert!(!db.foreign_keys_enabled().await.unwrap());
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn exec_and_last_insert_id() {
        let db = test_db().await;
        let affected = db
            .exec("INSERT INTO tblauthors (AuthorName) VALUES ('Test John Doe')")
            .await
            .unwrap();
        assert_eq!(affected, 1);
        assert_eq!(db.last_insert_id(), 1);

        db.execute(
            "INSERT INTO tblauthors (AuthorName) VALUES (?1)",
            ["Test Jane Smith"],
        )
        .await
        .unwrap();
        assert_eq!(db.last_insert_id(), 2);
    }

    #[tokio::test]
    async fn prepared_statement_runs() {
        let db = test_db().await;
        let mut stmt = db
            .prepare("INSERT INTO tblcategory (CategoryName, Status) VALUES (?1, ?2)")
            .await
            .unwrap();
        stmt.execute(libsql::params!["Fiction", 1]).await.unwrap();

        let mut rows = db
            .conn()
            .query("SELECT CategoryName, Status FROM tblcategory", ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<String>(0).unwrap(), "Fiction");
        assert_eq!(row.get::<i64>(1).unwrap(), 1);
    }

    #[tokio::test]
    async fn rollback_discards_writes() {
        let db = test_db().await;
        db.begin_transaction().await.unwrap();
        assert!(db.is_in_transaction());
        db.exec("INSERT INTO tblauthors (AuthorName) VALUES ('Temp')")
            .await
            .unwrap();
        db.rollback_transaction().await;
        assert!(!db.is_in_transaction());

        let mut rows = db
            .conn()
            .query("SELECT COUNT(*) FROM tblauthors", ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<i64>(0).unwrap(), 0);
    }

    #[tokio::test]
    async fn commit_keeps_writes() {
        let db = test_db().await;
        db.begin_transaction().await.unwrap();
        db.exec("INSERT INTO tblauthors (AuthorName) VALUES ('Kept')")
            .await
            .unwrap();
        db.commit_transaction().await.unwrap();
        assert!(!db.is_in_transaction());

        let mut rows = db
            .conn()
            .query("SELECT AuthorName FROM tblauthors", ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<String>(0).unwrap(), "Kept");
    }

    #[tokio::test]
    async fn transaction_calls_are_noops_in_wrong_state() {
        let db = test_db().await;
        // Nothing open: both are harmless.
        db.rollback_transaction().await;
        db.commit_transaction().await.unwrap();

        // Double begin does not nest.
        db.begin_transaction().await.unwrap();
        db.begin_transaction().await.unwrap();
        assert!(db.is_in_transaction());
        db.rollback_transaction().await;
        assert!(!db.is_in_transaction());
    }

    #[tokio::test]
    async fn file_database_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.db");
        let path = path.to_str().unwrap();

        {
            let db = LibraryDb::open_local(path).await.unwrap();
            db.exec("INSERT INTO tblauthors (AuthorName) VALUES ('Persisted')")
                .await
                .unwrap();
        }

        let db = LibraryDb::open_local(path).await.unwrap();
        let mut rows = db
            .conn()
            .query("SELECT AuthorName FROM tblauthors", ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<String>(0).unwrap(), "Persisted");
    }
}
