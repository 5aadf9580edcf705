//! Student repository: sign-up, lookup, search, status, profile, and login.

use chrono::Utc;
use libris_auth::{AuthError, policy};
use libris_core::entities::Student;
use libris_core::enums::ActiveStatus;
use libris_core::validation::{
    validate_email, validate_full_name, validate_mobile_number, validate_student_id,
};
use tracing::debug;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_optional_datetime, prefix_pattern};
use crate::login::LoginOutcome;
use crate::repos::password_matches;
use crate::service::LibraryService;
use crate::updates::SetClause;
use crate::updates::opt_value;
use crate::updates::student::StudentProfileUpdate;

const SELECT_COLS: &str = "id, StudentId, FullName, EmailId, MobileNumber, Password, Status, \
                           RegDate, UpdationDate";

fn row_to_student(row: &libsql::Row) -> Result<Student, DatabaseError> {
    Ok(Student {
        id: row.get(0)?,
        student_id: row.get(1)?,
        full_name: row.get(2)?,
        email: row.get(3)?,
        mobile_number: get_opt_string(row, 4)?,
        password_hash: row.get(5)?,
        status: ActiveStatus::try_from(row.get::<i64>(6)?)?,
        registered_at: parse_datetime(&row.get::<String>(7)?)?,
        updated_at: parse_optional_datetime(get_opt_string(row, 8)?.as_deref())?,
    })
}

/// Sign-up form input. `password` is plain text and is hashed on insert.
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub student_id: String,
    pub full_name: String,
    pub email: String,
    pub mobile_number: Option<String>,
    pub password: String,
}

impl NewStudent {
    /// Check every field the sign-up form checks.
    ///
    /// # Errors
    ///
    /// `DatabaseError::Validation` for a bad id, name, email, or mobile
    /// number; `DatabaseError::Auth` for a password that fails the policy.
    pub fn validate(&self) -> Result<(), DatabaseError> {
        validate_student_id(&self.student_id)?;
        validate_full_name(&self.full_name)?;
        validate_email(&self.email)?;
        if let Some(ref mobile) = self.mobile_number {
            validate_mobile_number(mobile)?;
        }
        policy::validate(&self.password)?;
        Ok(())
    }
}

impl LibraryService {
    /// Validate, hash, and insert a new active student.
    ///
    /// Duplicate emails or student ids surface as a unique violation.
    pub async fn register_student(&self, student: NewStudent) -> Result<Student, DatabaseError> {
        student.validate()?;
        let hash = self.hash(&student.password)?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO tblstudents \
                 (StudentId, FullName, EmailId, MobileNumber, Password, Status, RegDate) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                libsql::params![
                    student.student_id,
                    student.full_name,
                    student.email,
                    student.mobile_number,
                    hash,
                    ActiveStatus::Active.as_i64(),
                    Utc::now().to_rfc3339()
                ],
            )
            .await?;
        self.get_student(self.db().last_insert_id()).await
    }

    /// Look up by row id (the id issued-book records refer to).
    pub async fn get_student(&self, id: i64) -> Result<Student, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM tblstudents WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_student(&row)
    }

    pub async fn get_student_by_student_id(
        &self,
        student_id: &str,
    ) -> Result<Student, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM tblstudents WHERE StudentId = ?1"),
                [student_id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_student(&row)
    }

    pub async fn get_student_by_email(&self, email: &str) -> Result<Student, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM tblstudents WHERE EmailId = ?1"),
                [email],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_student(&row)
    }

    /// Students whose `StudentId` matches a raw `LIKE` pattern (`%` and `_`
    /// are wildcards), ordered by row id.
    pub async fn search_students(&self, pattern: &str) -> Result<Vec<Student>, DatabaseError> {
        self.query_students(
            &format!("SELECT {SELECT_COLS} FROM tblstudents WHERE StudentId LIKE ?1 ORDER BY id"),
            pattern,
        )
        .await
    }

    /// Students whose `StudentId` starts with `prefix`, taken literally.
    pub async fn students_with_id_prefix(
        &self,
        prefix: &str,
    ) -> Result<Vec<Student>, DatabaseError> {
        self.query_students(
            &format!(
                "SELECT {SELECT_COLS} FROM tblstudents \
                 WHERE StudentId LIKE ?1 ESCAPE '\\' ORDER BY id"
            ),
            &prefix_pattern(prefix),
        )
        .await
    }

    async fn query_students(&self, sql: &str, arg: &str) -> Result<Vec<Student>, DatabaseError> {
        let mut rows = self.db().conn().query(sql, [arg]).await?;
        let mut students = Vec::new();
        while let Some(row) = rows.next().await? {
            students.push(row_to_student(&row)?);
        }
        Ok(students)
    }

    pub async fn set_student_status(
        &self,
        id: i64,
        status: ActiveStatus,
    ) -> Result<Student, DatabaseError> {
        let affected = self
            .db()
            .conn()
            .execute(
                "UPDATE tblstudents SET Status = ?1, UpdationDate = ?2 WHERE id = ?3",
                libsql::params![status.as_i64(), Utc::now().to_rfc3339(), id],
            )
            .await?;
        if affected == 0 {
            return Err(DatabaseError::NoResult);
        }
        debug!(id, %status, "student status changed");
        self.get_student(id).await
    }

    /// Block a student; they can no longer log in.
    pub async fn block_student(&self, id: i64) -> Result<Student, DatabaseError> {
        self.set_student_status(id, ActiveStatus::Inactive).await
    }

    pub async fn activate_student(&self, id: i64) -> Result<Student, DatabaseError> {
        self.set_student_status(id, ActiveStatus::Active).await
    }

    /// Update name and mobile number from the profile page.
    pub async fn update_student_profile(
        &self,
        id: i64,
        update: StudentProfileUpdate,
    ) -> Result<Student, DatabaseError> {
        let mut clause = SetClause::default();
        if let Some(full_name) = update.full_name {
            validate_full_name(&full_name)?;
            clause.push("FullName", full_name.into());
        }
        if let Some(mobile) = update.mobile_number {
            if let Some(ref m) = mobile {
                validate_mobile_number(m)?;
            }
            clause.push("MobileNumber", opt_value(mobile));
        }
        if clause.is_empty() {
            return self.get_student(id).await;
        }
        clause.push("UpdationDate", Utc::now().to_rfc3339().into());

        let (sql, params) = clause.into_update("tblstudents", id);
        let affected = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if affected == 0 {
            return Err(DatabaseError::NoResult);
        }
        self.get_student(id).await
    }

    /// Log a student in by email. Blocked students get `Inactive` even with
    /// the right password.
    pub async fn authenticate_student(
        &self,
        email: &str,
        password: &str,
    ) -> Result<LoginOutcome<Student>, DatabaseError> {
        let student = match self.get_student_by_email(email).await {
            Ok(student) => student,
            Err(DatabaseError::NoResult) => {
                debug!(email, "student login: unknown account");
                return Ok(LoginOutcome::UnknownAccount);
            }
            Err(e) => return Err(e),
        };
        if !password_matches(password, &student.password_hash) {
            debug!(email, "student login: wrong password");
            return Ok(LoginOutcome::WrongPassword);
        }
        if !student.status.is_active() {
            debug!(email, "student login: account blocked");
            return Ok(LoginOutcome::Inactive);
        }
        Ok(LoginOutcome::Success(student))
    }

    /// Replace a student's password after checking the current one.
    ///
    /// # Errors
    ///
    /// `DatabaseError::Auth` with `IncorrectPassword`, `ConfirmationMismatch`,
    /// or `WeakPassword`; `DatabaseError::NoResult` for an unknown id.
    pub async fn change_student_password(
        &self,
        id: i64,
        current: &str,
        new: &str,
        confirm: &str,
    ) -> Result<(), DatabaseError> {
        let student = self.get_student(id).await?;
        if !password_matches(current, &student.password_hash) {
            return Err(AuthError::IncorrectPassword.into());
        }
        policy::validate_new_password(new, confirm)?;

        let hash = self.hash(new)?;
        self.db()
            .conn()
            .execute(
                "UPDATE tblstudents SET Password = ?1, UpdationDate = ?2 WHERE id = ?3",
                libsql::params![hash, Utc::now().to_rfc3339(), id],
            )
            .await?;
        Ok(())
    }
}
