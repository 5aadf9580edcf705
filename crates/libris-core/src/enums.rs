//! Status flags and the table catalog for Libris.
//!
//! Status flags are stored as `0`/`1` integers in the legacy schema but are
//! serialized as `snake_case` strings in JSON output.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// ActiveStatus
// ---------------------------------------------------------------------------

/// Active/inactive flag shared by students and categories.
///
/// Students with `Inactive` status are blocked from logging in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveStatus {
    Inactive,
    Active,
}

impl ActiveStatus {
    /// Integer stored in the `Status` column.
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        match self {
            Self::Inactive => 0,
            Self::Active => 1,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inactive => "inactive",
            Self::Active => "active",
        }
    }

    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl TryFrom<i64> for ActiveStatus {
    type Error = CoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Inactive),
            1 => Ok(Self::Active),
            other => Err(CoreError::InvalidValue {
                field: "Status",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ActiveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ReturnStatus
// ---------------------------------------------------------------------------

/// Whether an issued book has come back.
///
/// The `RetrunStatus` column is nullable; a NULL is treated as not returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnStatus {
    NotReturned,
    Returned,
}

impl ReturnStatus {
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        match self {
            Self::NotReturned => 0,
            Self::Returned => 1,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotReturned => "not_returned",
            Self::Returned => "returned",
        }
    }

    /// Map a nullable column value.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidValue` for anything other than NULL, 0, or 1.
    pub fn from_column(value: Option<i64>) -> Result<Self, CoreError> {
        match value {
            None | Some(0) => Ok(Self::NotReturned),
            Some(1) => Ok(Self::Returned),
            Some(other) => Err(CoreError::InvalidValue {
                field: "RetrunStatus",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ReturnStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// Every table in the library schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Admin,
    Authors,
    Categories,
    Books,
    Students,
    IssuedBookDetails,
}

impl Table {
    /// All tables, children before parents so deletes never trip a foreign key.
    pub const ALL: [Self; 6] = [
        Self::IssuedBookDetails,
        Self::Books,
        Self::Students,
        Self::Categories,
        Self::Authors,
        Self::Admin,
    ];

    /// SQL table name as created by the web application's bootstrap script.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Authors => "tblauthors",
            Self::Categories => "tblcategory",
            Self::Books => "tblbooks",
            Self::Students => "tblstudents",
            Self::IssuedBookDetails => "tblissuedbookdetails",
        }
    }

    /// Look up a table by its SQL name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_status_integer_encoding() {
        assert_eq!(ActiveStatus::Active.as_i64(), 1);
        assert_eq!(ActiveStatus::Inactive.as_i64(), 0);
        assert_eq!(ActiveStatus::try_from(1).unwrap(), ActiveStatus::Active);
        assert_eq!(ActiveStatus::try_from(0).unwrap(), ActiveStatus::Inactive);
    }

    #[test]
    fn active_status_rejects_other_integers() {
        let err = ActiveStatus::try_from(2).unwrap_err();
        assert!(matches!(err, CoreError::InvalidValue { field: "Status", .. }));
    }

    #[test]
    fn active_status_serializes_snake_case() {
        let json = serde_json::to_string(&ActiveStatus::Inactive).unwrap();
        assert_eq!(json, "\"inactive\"");
    }

    #[test]
    fn return_status_treats_null_as_not_returned() {
        assert_eq!(
            ReturnStatus::from_column(None).unwrap(),
            ReturnStatus::NotReturned
        );
        assert_eq!(
            ReturnStatus::from_column(Some(1)).unwrap(),
            ReturnStatus::Returned
        );
        assert!(ReturnStatus::from_column(Some(7)).is_err());
    }

    #[test]
    fn table_names_roundtrip() {
        for table in Table::ALL {
            assert_eq!(Table::from_name(table.as_str()), Some(table));
        }
        assert_eq!(Table::from_name("sqlite_sequence"), None);
    }

    #[test]
    fn table_order_puts_children_first() {
        let pos = |t: Table| Table::ALL.iter().position(|x| *x == t).unwrap();
        assert!(pos(Table::IssuedBookDetails) < pos(Table::Books));
        assert!(pos(Table::IssuedBookDetails) < pos(Table::Students));
        assert!(pos(Table::Books) < pos(Table::Categories));
        assert!(pos(Table::Books) < pos(Table::Authors));
    }
}
