//! Pagination types.

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};

/// Zero-based page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub index: usize,
    pub size: usize,
}

impl PageRequest {
    /// Create a page request; `size` must be positive.
    pub fn new(index: usize, size: usize) -> CatalogResult<Self> {
        if size == 0 {
            return Err(CatalogError::invalid("size", "page size must be greater than 0"));
        }
        Ok(Self { index, size })
    }

    /// Offset of the first element on this page.
    pub fn offset(&self) -> usize {
        self.index.saturating_mul(self.size)
    }
}

/// One page of results plus totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_index: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Assemble a page from its slice of items and the collection total.
    pub fn new(items: Vec<T>, request: PageRequest, total_items: usize) -> Self {
        Self {
            items,
            page_index: request.index,
            page_size: request.size,
            total_items,
            total_pages: total_items.div_ceil(request.size),
        }
    }

    /// Transform every item, keeping the page metadata.
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page_index: self.page_index,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_last(&self) -> bool {
        self.page_index.saturating_add(1) >= self.total_pages
    }
}
