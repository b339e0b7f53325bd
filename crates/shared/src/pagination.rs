use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_PAGE_LIMIT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PaginationError {
    #[error("page must be at least 1, got {0}")]
    PageOutOfRange(u32),
    #[error("limit must be greater than 0")]
    ZeroLimit,
}

/// A 1-indexed page request. Serializes as the `PaginationInput` object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    pub fn new(page: u32, limit: u32) -> Result<Self, PaginationError> {
        if page < 1 {
            return Err(PaginationError::PageOutOfRange(page));
        }
        if limit == 0 {
            return Err(PaginationError::ZeroLimit);
        }
        Ok(Self { page, limit })
    }

    pub fn first(limit: u32) -> Result<Self, PaginationError> {
        Self::new(1, limit)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn with_page(self, page: u32) -> Result<Self, PaginationError> {
        Self::new(page, self.limit)
    }

    /// Number of items a correct server returns for this request given `total`.
    pub fn expected_len(&self, total: u64) -> u64 {
        let skipped = u64::from(self.page - 1) * u64::from(self.limit);
        total.saturating_sub(skipped).min(u64::from(self.limit))
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

/// Server-reported paging totals. Never recomputed on the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total: u64,
    pub total_pages: u32,
    pub current_page: u32,
}

impl PageInfo {
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub info: PageInfo,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn map_items<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            info: self.info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_page_and_zero_limit() {
        assert_eq!(
            PageRequest::new(0, 10),
            Err(PaginationError::PageOutOfRange(0))
        );
        assert_eq!(PageRequest::new(1, 0), Err(PaginationError::ZeroLimit));
    }

    #[test]
    fn serializes_as_pagination_input() {
        let value = serde_json::to_value(PageRequest::new(2, 10).expect("request")).expect("json");
        assert_eq!(value, serde_json::json!({ "page": 2, "limit": 10 }));
    }

    #[test]
    fn expected_len_handles_partial_and_overflowing_pages() {
        let limit = 10;
        assert_eq!(PageRequest::new(1, limit).expect("p1").expected_len(23), 10);
        assert_eq!(PageRequest::new(3, limit).expect("p3").expected_len(23), 3);
        assert_eq!(PageRequest::new(4, limit).expect("p4").expected_len(23), 0);
        assert_eq!(PageRequest::new(1, limit).expect("p1").expected_len(0), 0);
    }

    #[test]
    fn page_info_bounds() {
        let first = PageInfo {
            total: 23,
            total_pages: 3,
            current_page: 1,
        };
        assert!(!first.has_previous());
        assert!(first.has_next());

        let last = PageInfo {
            current_page: 3,
            ..first
        };
        assert!(last.has_previous());
        assert!(!last.has_next());
    }
}
