//! Category repository.

use chrono::Utc;
use libris_core::entities::Category;
use libris_core::enums::ActiveStatus;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_optional_datetime};
use crate::service::LibraryService;
use crate::updates::SetClause;
use crate::updates::category::CategoryUpdate;

const SELECT_COLS: &str = "id, CategoryName, Status, CreationDate, UpdationDate";

fn row_to_category(row: &libsql::Row) -> Result<Category, DatabaseError> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        status: ActiveStatus::try_from(row.get::<i64>(2)?)?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
        updated_at: parse_optional_datetime(get_opt_string(row, 4)?.as_deref())?,
    })
}

impl LibraryService {
    pub async fn create_category(
        &self,
        name: &str,
        status: ActiveStatus,
    ) -> Result<Category, DatabaseError> {
        self.db()
            .conn()
            .execute(
                "INSERT INTO tblcategory (CategoryName, Status, CreationDate) VALUES (?1, ?2, ?3)",
                libsql::params![name, status.as_i64(), Utc::now().to_rfc3339()],
            )
            .await?;
        self.get_category(self.db().last_insert_id()).await
    }

    pub async fn get_category(&self, id: i64) -> Result<Category, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM tblcategory WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_category(&row)
    }

    /// All categories, optionally only those with the given status.
    pub async fn list_categories(
        &self,
        status: Option<ActiveStatus>,
    ) -> Result<Vec<Category>, DatabaseError> {
        let mut rows = match status {
            Some(status) => {
                self.db()
                    .conn()
                    .query(
                        &format!(
                            "SELECT {SELECT_COLS} FROM tblcategory WHERE Status = ?1 ORDER BY id"
                        ),
                        [status.as_i64()],
                    )
                    .await?
            }
            None => {
                self.db()
                    .conn()
                    .query(&format!("SELECT {SELECT_COLS} FROM tblcategory ORDER BY id"), ())
                    .await?
            }
        };
        let mut categories = Vec::new();
        while let Some(row) = rows.next().await? {
            categories.push(row_to_category(&row)?);
        }
        Ok(categories)
    }

    /// Apply the set fields of `update` and stamp `UpdationDate`.
    ///
    /// A rejected update (over-long or duplicate name) leaves the row unchanged.
    pub async fn update_category(
        &self,
        id: i64,
        update: CategoryUpdate,
    ) -> Result<Category, DatabaseError> {
        let mut clause = SetClause::default();
        if let Some(name) = update.name {
            clause.push("CategoryName", name.into());
        }
        if let Some(status) = update.status {
            clause.push("Status", status.as_i64().into());
        }
        if clause.is_empty() {
            return self.get_category(id).await;
        }
        clause.push("UpdationDate", Utc::now().to_rfc3339().into());

        let (sql, params) = clause.into_update("tblcategory", id);
        let affected = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if affected == 0 {
            return Err(DatabaseError::NoResult);
        }
        self.get_category(id).await
    }

    /// Delete a category. Its books, and their issue records, go too.
    ///
    /// # Errors
    ///
    /// `DatabaseError::NoResult` if no row has this id.
    pub async fn delete_category(&self, id: i64) -> Result<(), DatabaseError> {
        let affected = self
            .db()
            .conn()
            .execute("DELETE FROM tblcategory WHERE id = ?1", [id])
            .await?;
        if affected == 0 {
            return Err(DatabaseError::NoResult);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::test_service;
    use crate::updates::category::CategoryUpdateBuilder;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn create_category_roundtrip() {
        let svc = test_service().await;
        let category = svc
            .create_category("TestProgramming", ActiveStatus::Active)
            .await
            .unwrap();
        assert_eq!(category.name, "TestProgramming");
        assert_eq!(category.status, ActiveStatus::Active);
        assert_eq!(svc.get_category(category.id).await.unwrap(), category);
    }

    #[tokio::test]
    async fn empty_update_returns_current_row() {
        let svc = test_service().await;
        let category = svc
            .create_category("Fiction", ActiveStatus::Active)
            .await
            .unwrap();
        let same = svc
            .update_category(category.id, CategoryUpdateBuilder::new().build())
            .await
            .unwrap();
        assert_eq!(same, category);
    }

    #[tokio::test]
    async fn list_filters_by_status() {
        let svc = test_service().await;
        svc.create_category("Open", ActiveStatus::Active)
            .await
            .unwrap();
        svc.create_category("Closed", ActiveStatus::Inactive)
            .await
            .unwrap();

        assert_eq!(svc.list_categories(None).await.unwrap().len(), 2);
        let inactive = svc
            .list_categories(Some(ActiveStatus::Inactive))
            .await
            .unwrap();
        assert_eq!(inactive.len(), 1);
        assert_eq!(inactive[0].name, "Closed");
    }

    #[tokio::test]
    async fn update_unknown_category_is_no_result() {
        let svc = test_service().await;
        let update = CategoryUpdateBuilder::new().name("Ghost").build();
        assert!(matches!(
            svc.update_category(42, update).await,
            Err(DatabaseError::NoResult)
        ));
    }
}
