//! Admin repository: accounts, login, and password changes.

use chrono::Utc;
use libris_auth::{AuthError, policy};
use libris_core::entities::Admin;
use tracing::debug;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_optional_datetime};
use crate::login::LoginOutcome;
use crate::repos::password_matches;
use crate::service::LibraryService;

const SELECT_COLS: &str = "id, FullName, AdminEmail, UserName, Password, updationDate";

fn row_to_admin(row: &libsql::Row) -> Result<Admin, DatabaseError> {
    Ok(Admin {
        id: row.get(0)?,
        full_name: get_opt_string(row, 1)?,
        email: get_opt_string(row, 2)?,
        username: row.get(3)?,
        password_hash: row.get(4)?,
        updated_at: parse_optional_datetime(get_opt_string(row, 5)?.as_deref())?,
    })
}

impl LibraryService {
    /// Create an admin account. The password is hashed but not checked
    /// against the strength policy.
    pub async fn create_admin(
        &self,
        full_name: Option<&str>,
        email: Option<&str>,
        username: &str,
        password: &str,
    ) -> Result<Admin, DatabaseError> {
        let hash = self.hash(password)?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO admin (FullName, AdminEmail, UserName, Password) \
                 VALUES (?1, ?2, ?3, ?4)",
                libsql::params![full_name, email, username, hash.as_str()],
            )
            .await?;
        self.get_admin(self.db().last_insert_id()).await
    }

    pub async fn get_admin(&self, id: i64) -> Result<Admin, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM admin WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_admin(&row)
    }

    pub async fn get_admin_by_username(&self, username: &str) -> Result<Admin, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM admin WHERE UserName = ?1 ORDER BY id LIMIT 1"),
                [username],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_admin(&row)
    }

    pub async fn authenticate_admin(
        &self,
        username: &str,
        password: &str,
    ) -> Result<LoginOutcome<Admin>, DatabaseError> {
        let admin = match self.get_admin_by_username(username).await {
            Ok(admin) => admin,
            Err(DatabaseError::NoResult) => {
                debug!(username, "admin login: unknown account");
                return Ok(LoginOutcome::UnknownAccount);
            }
            Err(e) => return Err(e),
        };
        if !password_matches(password, &admin.password_hash) {
            debug!(username, "admin login: wrong password");
            return Ok(LoginOutcome::WrongPassword);
        }
        Ok(LoginOutcome::Success(admin))
    }

    /// Replace an admin's password after checking the current one.
    ///
    /// # Errors
    ///
    /// `DatabaseError::Auth` with `IncorrectPassword`, `ConfirmationMismatch`,
    /// or `WeakPassword`; `DatabaseError::NoResult` for an unknown id.
    pub async fn change_admin_password(
        &self,
        id: i64,
        current: &str,
        new: &str,
        confirm: &str,
    ) -> Result<(), DatabaseError> {
        let admin = self.get_admin(id).await?;
        if !password_matches(current, &admin.password_hash) {
            return Err(AuthError::IncorrectPassword.into());
        }
        policy::validate_new_password(new, confirm)?;

        let hash = self.hash(new)?;
        self.db()
            .conn()
            .execute(
                "UPDATE admin SET Password = ?1, updationDate = ?2 WHERE id = ?3",
                libsql::params![hash.as_str(), Utc::now().to_rfc3339(), id],
            )
            .await?;
        Ok(())
    }
}
