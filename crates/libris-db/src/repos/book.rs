//! Book repository: CRUD, detail join, and paginated listing.

use chrono::Utc;
use libris_core::entities::{Book, BookDetail};
use libris_core::pagination::{Page, PageRequest};

use crate::error::DatabaseError;
use crate::helpers::{
    get_count, get_opt_f64, get_opt_string, get_string_or_empty, parse_datetime,
    parse_optional_datetime, prefix_pattern,
};
use crate::service::LibraryService;
use crate::updates::book::BookUpdate;
use crate::updates::{SetClause, opt_value};

const SELECT_COLS: &str =
    "id, BookName, CatId, AuthorId, ISBNNumber, BookPrice, RegDate, UpdationDate";

fn row_to_book(row: &libsql::Row) -> Result<Book, DatabaseError> {
    Ok(Book {
        id: row.get(0)?,
        name: get_string_or_empty(row, 1)?,
        category_id: row.get::<Option<i64>>(2)?,
        author_id: row.get::<Option<i64>>(3)?,
        isbn: row.get::<Option<String>>(4)?,
        price: get_opt_f64(row, 5)?,
        registered_at: parse_datetime(&row.get::<String>(6)?)?,
        updated_at: parse_optional_datetime(get_opt_string(row, 7)?.as_deref())?,
    })
}

/// Fields for a new `tblbooks` row.
#[derive(Debug, Clone, Default)]
pub struct NewBook {
    pub name: String,
    pub category_id: Option<i64>,
    pub author_id: Option<i64>,
    /// Stored verbatim; letters and symbols are allowed.
    pub isbn: Option<String>,
    pub price: Option<f64>,
}

/// Listing filter. Empty means every book.
#[derive(Debug, Clone, Default)]
pub struct BookFilter {
    /// Match names starting with this text (wildcards are literal).
    pub name_prefix: Option<String>,
    pub category_id: Option<i64>,
    pub author_id: Option<i64>,
}

impl BookFilter {
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            name_prefix: Some(prefix.into()),
            ..Self::default()
        }
    }

    /// `WHERE ...` (or empty) plus its bound values, numbered from `?1`.
    fn where_clause(&self) -> (String, Vec<libsql::Value>) {
        let mut conds = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        if let Some(ref prefix) = self.name_prefix {
            params.push(prefix_pattern(prefix).into());
            conds.push(format!("BookName LIKE ?{} ESCAPE '\\'", params.len()));
        }
        if let Some(category_id) = self.category_id {
            params.push(category_id.into());
            conds.push(format!("CatId = ?{}", params.len()));
        }
        if let Some(author_id) = self.author_id {
            params.push(author_id.into());
            conds.push(format!("AuthorId = ?{}", params.len()));
        }
        if conds.is_empty() {
            (String::new(), params)
        } else {
            (format!(" WHERE {}", conds.join(" AND ")), params)
        }
    }
}

impl LibraryService {
    pub async fn create_book(&self, book: NewBook) -> Result<Book, DatabaseError> {
        self.db()
            .conn()
            .execute(
                "INSERT INTO tblbooks (BookName, CatId, AuthorId, ISBNNumber, BookPrice, RegDate) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![
                    book.name,
                    book.category_id,
                    book.author_id,
                    book.isbn,
                    book.price,
                    Utc::now().to_rfc3339()
                ],
            )
            .await?;
        self.get_book(self.db().last_insert_id()).await
    }

    pub async fn get_book(&self, id: i64) -> Result<Book, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM tblbooks WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_book(&row)
    }

    /// A book with its category and author names, as on the admin book list.
    pub async fn get_book_detail(&self, id: i64) -> Result<BookDetail, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT b.id, b.BookName, b.CatId, b.AuthorId, b.ISBNNumber, b.BookPrice, \
                 b.RegDate, b.UpdationDate, c.CategoryName, a.AuthorName \
                 FROM tblbooks b \
                 JOIN tblcategory c ON c.id = b.CatId \
                 JOIN tblauthors a ON a.id = b.AuthorId \
                 WHERE b.id = ?1",
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(BookDetail {
            book: row_to_book(&row)?,
            category_name: row.get(8)?,
            author_name: row.get(9)?,
        })
    }

    /// Apply the set fields of `update` and stamp `UpdationDate`.
    pub async fn update_book(&self, id: i64, update: BookUpdate) -> Result<Book, DatabaseError> {
        let mut clause = SetClause::default();
        if let Some(name) = update.name {
            clause.push("BookName", name.into());
        }
        if let Some(category_id) = update.category_id {
            clause.push("CatId", category_id.into());
        }
        if let Some(author_id) = update.author_id {
            clause.push("AuthorId", author_id.into());
        }
        if let Some(isbn) = update.isbn {
            clause.push("ISBNNumber", opt_value(isbn));
        }
        if let Some(price) = update.price {
            clause.push("BookPrice", opt_value(price));
        }
        if clause.is_empty() {
            return self.get_book(id).await;
        }
        clause.push("UpdationDate", Utc::now().to_rfc3339().into());

        let (sql, params) = clause.into_update("tblbooks", id);
        let affected = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if affected == 0 {
            return Err(DatabaseError::NoResult);
        }
        self.get_book(id).await
    }

    /// Delete a book and its issue records.
    ///
    /// # Errors
    ///
    /// `DatabaseError::NoResult` if no row has this id.
    pub async fn delete_book(&self, id: i64) -> Result<(), DatabaseError> {
        let affected = self
            .db()
            .conn()
            .execute("DELETE FROM tblbooks WHERE id = ?1", [id])
            .await?;
        if affected == 0 {
            return Err(DatabaseError::NoResult);
        }
        Ok(())
    }

    pub async fn count_books(&self, filter: &BookFilter) -> Result<u64, DatabaseError> {
        let (where_sql, params) = filter.where_clause();
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT COUNT(*) FROM tblbooks{where_sql}"),
                libsql::params_from_iter(params),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        get_count(&row, 0)
    }

    /// One page of books ordered by id. `per_page` is capped at
    /// `library.max_page_size`.
    pub async fn list_books(
        &self,
        filter: &BookFilter,
        request: PageRequest,
    ) -> Result<Page<Book>, DatabaseError> {
        let request = request.capped(self.library().max_page_size);
        let total = self.count_books(filter).await?;

        let (where_sql, mut params) = filter.where_clause();
        let offset = i64::try_from(request.offset())
            .map_err(|_| DatabaseError::Validation("page offset out of range".into()))?;
        params.push(i64::from(request.limit()).into());
        let limit_idx = params.len();
        params.push(offset.into());
        let offset_idx = params.len();

        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM tblbooks{where_sql} \
                     ORDER BY id ASC LIMIT ?{limit_idx} OFFSET ?{offset_idx}"
                ),
                libsql::params_from_iter(params),
            )
            .await?;
        let mut books = Vec::new();
        while let Some(row) = rows.next().await? {
            books.push(row_to_book(&row)?);
        }
        Ok(Page::new(books, request, total))
    }
}
