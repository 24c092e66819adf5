//! # Paginator
//!
//! Converts (page number, page size, total count) into an offset/limit
//! window and a page count.

use crate::errors::{RecordError, RecordResult};

/// Offset/limit slice of a result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: usize,
    pub limit: usize,
}

impl PageWindow {
    /// Apply the window to an ordered sequence
    pub fn slice<I: IntoIterator>(&self, items: I) -> impl Iterator<Item = I::Item> {
        items.into_iter().skip(self.offset).take(self.limit)
    }
}

/// Validated pagination request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    page: usize,
}

impl Paginator {
    /// Both values must be strictly positive. Signed input lets callers pass
    /// through whatever the client sent.
    pub fn new(page_size: i64, page: i64) -> RecordResult<Self> {
        if page_size <= 0 {
            return Err(RecordError::invalid(format!(
                "pageSize must be positive, got {}",
                page_size
            )));
        }
        if page <= 0 {
            return Err(RecordError::invalid(format!(
                "page must be >= 1, got {}",
                page
            )));
        }
        Ok(Self {
            page_size: page_size as usize,
            page: page as usize,
        })
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// `(page - 1) * pageSize`; may exceed the total count
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.page_size)
    }

    pub fn window(&self) -> PageWindow {
        PageWindow {
            offset: self.offset(),
            limit: self.page_size,
        }
    }

    /// `ceil(total / pageSize)`, zero for an empty set
    pub fn total_pages(&self, total_count: usize) -> u64 {
        total_count.div_ceil(self.page_size) as u64
    }
}
