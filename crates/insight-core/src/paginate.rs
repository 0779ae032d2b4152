//! Fixed-size pagination of a filtered record set.

use std::ops::Range;

use serde::Serialize;

/// Number of pages needed for `total` items, `ceil(total / page_size)`.
///
/// A zero page size is treated as one.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1))
}

/// Clamps a 1-based page index into `[1, max(total_pages, 1)]`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Index range of a 1-based page, truncated to `total`.
///
/// Page 0 reads as page 1. Pages past the end yield an empty range.
pub fn page_range(total: usize, page: usize, page_size: usize) -> Range<usize> {
    let page_size = page_size.max(1);
    let start = (page.max(1) - 1).saturating_mul(page_size).min(total);
    let end = start.saturating_add(page_size).min(total);
    start..end
}

/// One page of items plus the bookkeeping presentation needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// 1-based index of this page, as requested.
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_records: usize,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Transforms the items while keeping the page bookkeeping.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
            total_records: self.total_records,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}

/// Slices `items[(page - 1) * size .. page * size]`.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let page = page.max(1);
    Page {
        page,
        page_size,
        total_pages: total_pages(items.len(), page_size),
        total_records: items.len(),
        items: items[page_range(items.len(), page, page_size)].to_vec(),
    }
}
