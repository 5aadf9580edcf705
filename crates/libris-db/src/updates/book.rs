//! Book update builder.

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct BookUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Option<f64>>,
}

pub struct BookUpdateBuilder(BookUpdate);

impl BookUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(BookUpdate::default())
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn category_id(mut self, category_id: i64) -> Self {
        self.0.category_id = Some(category_id);
        self
    }

    #[must_use]
    pub fn author_id(mut self, author_id: i64) -> Self {
        self.0.author_id = Some(author_id);
        self
    }

    #[must_use]
    pub fn isbn(mut self, isbn: Option<String>) -> Self {
        self.0.isbn = Some(isbn);
        self
    }

    #[must_use]
    pub fn price(mut self, price: Option<f64>) -> Self {
        self.0.price = Some(price);
        self
    }

    #[must_use]
    pub fn build(self) -> BookUpdate {
        self.0
    }
}

impl Default for BookUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
