//! Page parameters for the gallery.
//!
//! `Pagination` is supplied by the surrounding application on every
//! recomputation. The selector trusts it: `page`, `total_page` and
//! `total_size` must describe the same roster snapshot the selector is given.

use crate::errors::GalleryError;
use serde::{Deserialize, Serialize};

/// Current page and page geometry.
///
/// Invariant (checked by [`Pagination::new`]): `page_size >= 1`,
/// `total_page >= 1` and `page < total_page`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pagination {
    /// Zero-based index of the current page.
    pub page: usize,
    /// Capacity of one page.
    pub page_size: usize,
    /// Number of pages, at least 1.
    pub total_page: usize,
    /// Number of participants across all pages.
    pub total_size: usize,
}

impl Pagination {
    /// Create validated pagination parameters.
    ///
    /// # Errors
    ///
    /// Returns `GalleryError::InvalidPagination` if `page_size` or
    /// `total_page` is zero, or `page >= total_page`.
    pub fn new(
        page: usize,
        page_size: usize,
        total_page: usize,
        total_size: usize,
    ) -> Result<Self, GalleryError> {
        if page_size == 0 {
            return Err(GalleryError::InvalidPagination(
                "page_size must be at least 1".to_string(),
            ));
        }
        if total_page == 0 {
            return Err(GalleryError::InvalidPagination(
                "total_page must be at least 1".to_string(),
            ));
        }
        if page >= total_page {
            return Err(GalleryError::InvalidPagination(format!(
                "page {page} >= total_page {total_page}"
            )));
        }

        Ok(Self {
            page,
            page_size,
            total_page,
            total_size,
        })
    }

    /// Derive pagination for a roster of `total_size` participants.
    ///
    /// A zero `page_size` is treated as 1 and `page` is clamped to the last page.
    #[must_use]
    pub fn for_roster(page_size: usize, total_size: usize, page: usize) -> Self {
        let page_size = page_size.max(1);
        let total_page = total_size.div_ceil(page_size).max(1);

        Self {
            page: page.min(total_page - 1),
            page_size,
            total_page,
            total_size,
        }
    }

    /// Re-derive the page count for a new roster length, keeping the current
    /// page unless it no longer exists.
    #[must_use]
    pub fn resize(self, total_size: usize) -> Self {
        Self::for_roster(self.page_size, total_size, self.page)
    }

    /// Pagination with a different page size, clamping the current page.
    #[must_use]
    pub fn with_page_size(self, page_size: usize) -> Self {
        Self::for_roster(page_size, self.total_size, self.page)
    }

    /// The following page, or `None` on the last page.
    #[must_use]
    pub fn next_page(self) -> Option<Self> {
        (self.page + 1 < self.total_page).then_some(Self {
            page: self.page + 1,
            ..self
        })
    }

    /// The preceding page, or `None` on the first page.
    #[must_use]
    pub fn previous_page(self) -> Option<Self> {
        self.page.checked_sub(1).map(|page| Self { page, ..self })
    }

    /// Whether the current page is the last one.
    #[must_use]
    pub fn is_last_page(&self) -> bool {
        self.page + 1 == self.total_page
    }

    /// Number of grid slots needed for the current page.
    ///
    /// Equal to `page_size` except on the last page, where it shrinks to the
    /// remainder `total_size % page_size` (a zero remainder means a full page).
    /// Sizes the layout grid only; the participant list is never re-sliced by it.
    #[must_use]
    pub fn effective_page_size(&self) -> usize {
        if self.page_size == 0 || !self.is_last_page() {
            return self.page_size;
        }

        match self.total_size % self.page_size {
            0 => self.page_size,
            remainder => remainder.min(self.page_size),
        }
    }
}
