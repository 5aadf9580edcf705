//! Test-database bootstrap: reset, truncate, and seed.
//!
//! These mirror the scripts that prepare the shared test database before a
//! suite run. Failures that should not abort a reset (a table that cannot be
//! cleared, a base row that already exists) are logged and skipped.

use libris_auth::hash_password;
use libris_core::enums::{ActiveStatus, Table};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::LibraryDb;
use crate::error::DatabaseError;
use crate::helpers::get_count;

/// Category inserted by [`LibraryDb::seed_base_data`].
pub const BASE_CATEGORY: &str = "Test Category";
/// Author inserted by [`LibraryDb::seed_base_data`].
pub const BASE_AUTHOR: &str = "Test Author";

/// Plain-text password of every account created by [`LibraryDb::seed_fixtures`].
pub const FIXTURE_PASSWORD: &str = "123456";
pub const FIXTURE_ADMIN_USERNAME: &str = "testadmin";

/// Row ids created by [`LibraryDb::seed_fixtures`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeededFixtures {
    pub admin_id: i64,
    pub author_ids: [i64; 2],
    pub category_ids: [i64; 2],
    pub book_ids: [i64; 2],
    pub student_ids: [i64; 2],
}

impl LibraryDb {
    /// Bring the database back to the base state tests start from.
    ///
    /// Rolls back any open transaction, clears every library table with
    /// foreign keys disabled, resets autoincrement counters, seeds the base
    /// category and author, then opens a fresh transaction for the caller to
    /// roll back.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if foreign keys cannot be disabled, the table
    /// catalog cannot be read, or the final `BEGIN` fails.
    pub async fn reset_test_database(&self) -> Result<(), DatabaseError> {
        self.rollback_transaction().await;
        self.set_foreign_keys(false).await?;

        let cleared = self.clear_tables().await;

        if let Err(e) = self.set_foreign_keys(self.foreign_keys).await {
            warn!(error = %e, "could not restore foreign key enforcement after reset");
        }
        cleared?;

        if let Err(e) = self.seed_base_data().await {
            warn!(error = %e, "base data seeding failed");
        }

        self.begin_transaction().await?;
        info!("test database reset");
        Ok(())
    }

    /// Delete all rows from every library table without touching counters or
    /// seeding anything.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` on the first failing delete.
    pub async fn truncate_all(&self) -> Result<(), DatabaseError> {
        self.rollback_transaction().await;
        self.set_foreign_keys(false).await?;
        let mut result = Ok(());
        for table in Table::ALL {
            if let Err(e) = self
                .conn
                .execute(&format!("DELETE FROM {}", table.as_str()), ())
                .await
            {
                result = Err(e.into());
                break;
            }
        }
        self.set_foreign_keys(self.foreign_keys).await?;
        result
    }

    /// Insert the active base category and the base author.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if either insert fails (for example because
    /// the rows already exist).
    pub async fn seed_base_data(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                "INSERT INTO tblcategory (CategoryName, Status) VALUES (?1, ?2)",
                libsql::params![BASE_CATEGORY, ActiveStatus::Active.as_i64()],
            )
            .await?;
        self.conn
            .execute(
                "INSERT INTO tblauthors (AuthorName) VALUES (?1)",
                [BASE_AUTHOR],
            )
            .await?;
        debug!("seeded base category and author");
        Ok(())
    }

    /// Insert the fixture dataset: one admin, two authors, two categories,
    /// two books, and two active students. Every account's password is
    /// [`FIXTURE_PASSWORD`], hashed at `bcrypt_cost`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if hashing or any insert fails.
    pub async fn seed_fixtures(&self, bcrypt_cost: u32) -> Result<SeededFixtures, DatabaseError> {
        let hash = hash_password(FIXTURE_PASSWORD, bcrypt_cost)?;

        self.conn
            .execute(
                "INSERT INTO admin (FullName, AdminEmail, UserName, Password) \
                 VALUES (?1, ?2, ?3, ?4)",
                libsql::params![
                    "Test Admin",
                    "testadmin@example.com",
                    FIXTURE_ADMIN_USERNAME,
                    hash.as_str()
                ],
            )
            .await?;
        let admin_id = self.last_insert_id();

        let mut author_ids = [0; 2];
        for (slot, name) in author_ids.iter_mut().zip(["Test Author 1", "Test Author 2"]) {
            self.conn
                .execute("INSERT INTO tblauthors (AuthorName) VALUES (?1)", [name])
                .await?;
            *slot = self.last_insert_id();
        }

        let mut category_ids = [0; 2];
        for (slot, name) in category_ids
            .iter_mut()
            .zip(["Test Category 1", "Test Category 2"])
        {
            self.conn
                .execute(
                    "INSERT INTO tblcategory (CategoryName, Status) VALUES (?1, 1)",
                    [name],
                )
                .await?;
            *slot = self.last_insert_id();
        }

        let books = [
            ("Test Book 1", category_ids[0], author_ids[0], "1234567890", 25.0),
            ("Test Book 2", category_ids[1], author_ids[1], "9876543210", 30.0),
        ];
        let mut book_ids = [0; 2];
        for (slot, (name, cat, author, isbn, price)) in book_ids.iter_mut().zip(books) {
            self.conn
                .execute(
                    "INSERT INTO tblbooks (BookName, CatId, AuthorId, ISBNNumber, BookPrice) \
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    libsql::params![name, cat, author, isbn, price],
                )
                .await?;
            *slot = self.last_insert_id();
        }

        let students = [
            ("TEST001", "Test Student 1", "student1@example.com", "1234567890"),
            ("TEST002", "Test Student 2", "student2@example.com", "9876543210"),
        ];
        let mut student_ids = [0; 2];
        for (slot, (code, name, email, mobile)) in student_ids.iter_mut().zip(students) {
            self.conn
                .execute(
                    "INSERT INTO tblstudents \
                     (StudentId, FullName, EmailId, MobileNumber, Password, Status) \
                     VALUES (?1, ?2, ?3, ?4, ?5, 1)",
                    libsql::params![code, name, email, mobile, hash.as_str()],
                )
                .await?;
            *slot = self.last_insert_id();
        }

        info!("seeded fixture dataset");
        Ok(SeededFixtures {
            admin_id,
            author_ids,
            category_ids,
            book_ids,
            student_ids,
        })
    }

    /// Row count of every library table, in [`Table::ALL`] order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a count query fails.
    pub async fn row_counts(&self) -> Result<Vec<(Table, u64)>, DatabaseError> {
        let mut counts = Vec::with_capacity(Table::ALL.len());
        for table in Table::ALL {
            let mut rows = self
                .conn
                .query(&format!("SELECT COUNT(*) FROM {}", table.as_str()), ())
                .await?;
            let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
            counts.push((table, get_count(&row, 0)?));
        }
        Ok(counts)
    }

    /// Delete every row of each known table that exists, resetting its
    /// autoincrement counter. Per-table failures are logged and skipped.
    async fn clear_tables(&self) -> Result<(), DatabaseError> {
        let existing = self.existing_tables().await?;
        let has_sequence = self.table_exists("sqlite_sequence").await?;

        for table in Table::ALL {
            let name = table.as_str();
            if !existing.iter().any(|t| t == name) {
                debug!(table = name, "skipping missing table");
                continue;
            }
            if let Err(e) = self.conn.execute(&format!("DELETE FROM {name}"), ()).await {
                warn!(table = name, error = %e, "failed to clear table");
                continue;
            }
            if has_sequence {
                if let Err(e) = self
                    .conn
                    .execute("DELETE FROM sqlite_sequence WHERE name = ?1", [name])
                    .await
                {
                    warn!(table = name, error = %e, "failed to reset autoincrement");
                }
            }
        }
        Ok(())
    }
}
