//! Pagination requests and paginated result pages

use serde::Serialize;

/// Resolved pagination for one list request
///
/// Built by the pipeline from the client's `page`/`per_page` after clamping,
/// so sources can trust both values to be at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub per_page: usize,
}

impl PageRequest {
    /// Create a page request, clamping both values to a minimum of 1
    pub fn new(page: usize, per_page: usize) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// Number of rows to skip, saturating for absurdly large pages
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, 20)
    }
}

/// One page of listed entities
#[derive(Debug, Clone, Serialize)]
pub struct ResultPage<T> {
    /// The entities on this page, in listing order
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationMeta,
}

impl<T> ResultPage<T> {
    /// Wrap a page of entities with its metadata
    pub fn new(data: Vec<T>, request: PageRequest, total: usize) -> Self {
        Self {
            data,
            pagination: PaginationMeta::new(request.page, request.per_page, total),
        }
    }

    /// An empty page (no matches is a valid result)
    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }

    /// Check if the page holds no entities
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Transform the entities while keeping the metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ResultPage<U> {
        ResultPage {
            data: self.data.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub per_page: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata from calculation
    pub fn new(page: usize, per_page: usize, total: usize) -> Self {
        let page = page.max(1);
        // Ensure per_page is at least 1 to avoid division by zero
        let per_page = per_page.max(1);
        let total_pages = if total == 0 { 0 } else { total.div_ceil(per_page) };
        let start = (page - 1).saturating_mul(per_page);

        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: start.saturating_add(per_page) < total,
            has_prev: page > 1,
        }
    }
}
