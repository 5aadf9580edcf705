//! Schema migration runner.
//!
//! Embeds the SQL migration files at compile time and executes them on
//! database open. All statements use `IF NOT EXISTS` for idempotent re-running.

use libris_core::enums::Table;
use tracing::info;

use crate::LibraryDb;
use crate::error::DatabaseError;

/// Initial schema: 6 tables, 4 indexes.
const MIGRATION_001: &str = include_str!("../migrations/001_initial.sql");

impl LibraryDb {
    /// Run all embedded migrations in sequence.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Migration` naming the migration that failed.
    pub async fn run_migrations(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(MIGRATION_001)
            .await
            .map_err(|e| DatabaseError::Migration(format!("001_initial: {e}")))?;
        Ok(())
    }

    /// Drop every library table and create the schema again.
    ///
    /// Any open transaction is rolled back first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a drop or the migration fails.
    pub async fn recreate_schema(&self) -> Result<(), DatabaseError> {
        self.rollback_transaction().await;
        self.set_foreign_keys(false).await?;
        for table in Table::ALL {
            self.conn
                .execute(&format!("DROP TABLE IF EXISTS {}", table.as_str()), ())
                .await
                .map_err(|e| DatabaseError::Migration(format!("drop {table}: {e}")))?;
        }
        self.run_migrations().await?;
        self.set_foreign_keys(self.foreign_keys).await?;
        info!("schema recreated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::LibraryDb;

    #[tokio::test]
    async fn recreate_schema_empties_tables() {
        let db = LibraryDb::open_in_memory().await.unwrap();
        db.exec("INSERT INTO tblauthors (AuthorName) VALUES ('Gone')")
            .await
            .unwrap();

        db.recreate_schema().await.unwrap();

        let mut rows = db
            .conn()
            .query("SELECT COUNT(*) FROM tblauthors", ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<i64>(0).unwrap(), 0);
        assert!(db.foreign_keys_enabled().await.unwrap());
    }
}
