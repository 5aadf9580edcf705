//! Issued-book repository: lending, returns, and a student's loan history.

use chrono::{Duration, Utc};
use libris_core::entities::{IssuedBook, IssuedBookDetail};
use libris_core::enums::ReturnStatus;
use tracing::info;

use crate::error::DatabaseError;
use crate::helpers::{
    get_count, get_opt_f64, get_opt_string, get_string_or_empty, parse_datetime,
    parse_optional_datetime,
};
use crate::service::LibraryService;

const SELECT_COLS: &str = "id, BookId, StudentID, IssuesDate, ReturnDate, RetrunStatus, fine";

const DETAIL_SELECT: &str = "SELECT i.id, b.BookName, b.ISBNNumber, i.IssuesDate, i.ReturnDate, \
                             i.RetrunStatus, i.fine \
                             FROM tblissuedbookdetails i \
                             JOIN tblbooks b ON i.BookId = b.id";

fn row_to_issued(row: &libsql::Row) -> Result<IssuedBook, DatabaseError> {
    Ok(IssuedBook {
        id: row.get(0)?,
        book_id: row.get(1)?,
        student_id: row.get(2)?,
        issued_at: parse_datetime(&row.get::<String>(3)?)?,
        return_date: parse_optional_datetime(get_opt_string(row, 4)?.as_deref())?,
        return_status: ReturnStatus::from_column(row.get::<Option<i64>>(5)?)?,
        fine: get_opt_f64(row, 6)?,
    })
}

fn row_to_detail(row: &libsql::Row) -> Result<IssuedBookDetail, DatabaseError> {
    Ok(IssuedBookDetail {
        issue_id: row.get(0)?,
        book_name: get_string_or_empty(row, 1)?,
        isbn: row.get::<Option<String>>(2)?,
        issued_at: parse_datetime(&row.get::<String>(3)?)?,
        return_date: parse_optional_datetime(get_opt_string(row, 4)?.as_deref())?,
        return_status: ReturnStatus::from_column(row.get::<Option<i64>>(5)?)?,
        fine: get_opt_f64(row, 6)?,
    })
}

impl LibraryService {
    /// Lend `book_id` to the student with row id `student_row_id`.
    ///
    /// The record starts unreturned with `ReturnDate` set to the due date,
    /// `library.loan_period_days` from now.
    ///
    /// # Errors
    ///
    /// `DatabaseError::NoResult` if the student or the book does not exist.
    pub async fn issue_book(
        &self,
        student_row_id: i64,
        book_id: i64,
    ) -> Result<IssuedBook, DatabaseError> {
        self.get_student(student_row_id).await?;
        self.get_book(book_id).await?;

        let now = Utc::now();
        let due = now + Duration::days(i64::from(self.library().loan_period_days));
        self.db()
            .conn()
            .execute(
                "INSERT INTO tblissuedbookdetails \
                 (BookId, StudentID, IssuesDate, ReturnDate, RetrunStatus) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                libsql::params![
                    book_id,
                    student_row_id,
                    now.to_rfc3339(),
                    due.to_rfc3339(),
                    ReturnStatus::NotReturned.as_i64()
                ],
            )
            .await?;
        let issued = self.get_issued_book(self.db().last_insert_id()).await?;
        info!(issue_id = issued.id, book_id, student_row_id, "book issued");
        Ok(issued)
    }

    /// Mark an issue returned now and record the fine.
    ///
    /// # Errors
    ///
    /// `DatabaseError::InvalidState` if it was already returned,
    /// `DatabaseError::NoResult` if the record does not exist.
    pub async fn return_book(&self, issue_id: i64, fine: f64) -> Result<IssuedBook, DatabaseError> {
        let current = self.get_issued_book(issue_id).await?;
        if current.return_status == ReturnStatus::Returned {
            return Err(DatabaseError::InvalidState(format!(
                "issue {issue_id} was already returned"
            )));
        }
        self.db()
            .conn()
            .execute(
                "UPDATE tblissuedbookdetails \
                 SET fine = ?1, RetrunStatus = ?2, ReturnDate = ?3 WHERE id = ?4",
                libsql::params![
                    fine,
                    ReturnStatus::Returned.as_i64(),
                    Utc::now().to_rfc3339(),
                    issue_id
                ],
            )
            .await?;
        self.get_issued_book(issue_id).await
    }

    pub async fn get_issued_book(&self, id: i64) -> Result<IssuedBook, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM tblissuedbookdetails WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_issued(&row)
    }

    /// Every issue for a student, current and returned, oldest first.
    pub async fn issued_books_for_student(
        &self,
        student_row_id: i64,
    ) -> Result<Vec<IssuedBookDetail>, DatabaseError> {
        self.query_details(
            &format!("{DETAIL_SELECT} WHERE i.StudentID = ?1 ORDER BY i.id ASC"),
            student_row_id,
        )
        .await
    }

    /// Issues not yet returned (`RetrunStatus` 0 or NULL).
    pub async fn current_issues_for_student(
        &self,
        student_row_id: i64,
    ) -> Result<Vec<IssuedBookDetail>, DatabaseError> {
        self.query_details(
            &format!(
                "{DETAIL_SELECT} WHERE i.StudentID = ?1 \
                 AND (i.RetrunStatus = 0 OR i.RetrunStatus IS NULL) ORDER BY i.id ASC"
            ),
            student_row_id,
        )
        .await
    }

    pub async fn returned_books_for_student(
        &self,
        student_row_id: i64,
    ) -> Result<Vec<IssuedBookDetail>, DatabaseError> {
        self.query_details(
            &format!(
                "{DETAIL_SELECT} WHERE i.StudentID = ?1 AND i.RetrunStatus = 1 ORDER BY i.id ASC"
            ),
            student_row_id,
        )
        .await
    }

    /// Number of books a student currently holds.
    pub async fn outstanding_count(&self, student_row_id: i64) -> Result<u64, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT COUNT(*) FROM tblissuedbookdetails \
                 WHERE StudentID = ?1 AND (RetrunStatus = 0 OR RetrunStatus IS NULL)",
                [student_row_id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        get_count(&row, 0)
    }

    async fn query_details(
        &self,
        sql: &str,
        student_row_id: i64,
    ) -> Result<Vec<IssuedBookDetail>, DatabaseError> {
        let mut rows = self.db().conn().query(sql, [student_row_id]).await?;
        let mut details = Vec::new();
        while let Some(row) = rows.next().await? {
            details.push(row_to_detail(&row)?);
        }
        Ok(details)
    }
}
