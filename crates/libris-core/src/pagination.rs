//! Page requests and paged results for listing screens.

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    /// Build a request for `page` (1-based) with `per_page` rows.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if either value is zero.
    pub fn new(page: u32, per_page: u32) -> Result<Self, CoreError> {
        if page == 0 {
            return Err(CoreError::Validation("page numbers start at 1".into()));
        }
        if per_page == 0 {
            return Err(CoreError::Validation("per_page must be at least 1".into()));
        }
        Ok(Self { page, per_page })
    }

    /// First page with the given size.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if `per_page` is zero.
    pub fn first(per_page: u32) -> Result<Self, CoreError> {
        Self::new(1, per_page)
    }

    #[must_use]
    pub const fn page(self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn per_page(self) -> u32 {
        self.per_page
    }

    /// `LIMIT` value.
    #[must_use]
    pub const fn limit(self) -> u32 {
        self.per_page
    }

    /// `OFFSET` value.
    #[must_use]
    pub const fn offset(self) -> u64 {
        (self.page as u64 - 1) * self.per_page as u64
    }

    /// Clamp `per_page` to `max`.
    #[must_use]
    pub fn capped(self, max: u32) -> Self {
        Self {
            page: self.page,
            per_page: self.per_page.min(max.max(1)),
        }
    }
}

/// One page of results plus the totals needed to render a pager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            page: request.page(),
            per_page: request.per_page(),
            total,
            total_pages: total_pages(total, request.per_page()),
        }
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// `ceil(total / per_page)`, saturating at `u32::MAX`.
#[must_use]
pub fn total_pages(total: u64, per_page: u32) -> u32 {
    if per_page == 0 {
        return 0;
    }
    u32::try_from(total.div_ceil(u64::from(per_page))).unwrap_or(u32::MAX)
}
