//! Student profile update builder.
//!
//! Only the name and mobile number are editable from the profile page. The
//! email address is the login key and has no setter.

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct StudentProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<Option<String>>,
}

pub struct StudentProfileUpdateBuilder(StudentProfileUpdate);

impl StudentProfileUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(StudentProfileUpdate::default())
    }

    #[must_use]
    pub fn full_name(mut self, full_name: impl Into<String>) -> Self {
        self.0.full_name = Some(full_name.into());
        self
    }

    #[must_use]
    pub fn mobile_number(mut self, mobile_number: Option<String>) -> Self {
        self.0.mobile_number = Some(mobile_number);
        self
    }

    #[must_use]
    pub fn build(self) -> StudentProfileUpdate {
        self.0
    }
}

impl Default for StudentProfileUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
