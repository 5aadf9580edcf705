//! Author repository.

use chrono::Utc;
use libris_core::entities::Author;

use crate::error::DatabaseError;
use crate::helpers::{get_count, get_opt_string, parse_datetime, parse_optional_datetime};
use crate::service::LibraryService;

const SELECT_COLS: &str = "id, AuthorName, creationDate, UpdationDate";

fn row_to_author(row: &libsql::Row) -> Result<Author, DatabaseError> {
    Ok(Author {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at: parse_datetime(&row.get::<String>(2)?)?,
        updated_at: parse_optional_datetime(get_opt_string(row, 3)?.as_deref())?,
    })
}

impl LibraryService {
    /// Insert an author. Names are unique and at most 159 characters.
    pub async fn create_author(&self, name: &str) -> Result<Author, DatabaseError> {
        self.db()
            .conn()
            .execute(
                "INSERT INTO tblauthors (AuthorName, creationDate) VALUES (?1, ?2)",
                libsql::params![name, Utc::now().to_rfc3339()],
            )
            .await?;
        self.get_author(self.db().last_insert_id()).await
    }

    pub async fn get_author(&self, id: i64) -> Result<Author, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM tblauthors WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_author(&row)
    }

    pub async fn list_authors(&self) -> Result<Vec<Author>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM tblauthors ORDER BY id"), ())
            .await?;
        let mut authors = Vec::new();
        while let Some(row) = rows.next().await? {
            authors.push(row_to_author(&row)?);
        }
        Ok(authors)
    }

    /// Rename an author and stamp `UpdationDate`.
    pub async fn rename_author(&self, id: i64, name: &str) -> Result<Author, DatabaseError> {
        let affected = self
            .db()
            .conn()
            .execute(
                "UPDATE tblauthors SET AuthorName = ?1, UpdationDate = ?2 WHERE id = ?3",
                libsql::params![name, Utc::now().to_rfc3339(), id],
            )
            .await?;
        if affected == 0 {
            return Err(DatabaseError::NoResult);
        }
        self.get_author(id).await
    }

    /// Delete an author. Their books, and those books' issue records, go too.
    ///
    /// # Errors
    ///
    /// `DatabaseError::NoResult` if no row has this id.
    pub async fn delete_author(&self, id: i64) -> Result<(), DatabaseError> {
        let affected = self
            .db()
            .conn()
            .execute("DELETE FROM tblauthors WHERE id = ?1", [id])
            .await?;
        if affected == 0 {
            return Err(DatabaseError::NoResult);
        }
        Ok(())
    }

    pub async fn count_authors(&self) -> Result<u64, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query("SELECT COUNT(*) FROM tblauthors", ())
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        get_count(&row, 0)
    }
}
