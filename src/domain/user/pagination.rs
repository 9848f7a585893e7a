//! Offset pagination and directory statistics

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

pub const DEFAULT_PAGE_LIMIT: usize = 100;

/// Offset/limit window over the directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    skip: usize,
    limit: usize,
}

impl PageRequest {
    /// `limit` must be at least 1
    pub fn new(skip: usize, limit: usize) -> Result<Self, DomainError> {
        if limit == 0 {
            return Err(DomainError::invalid_argument("limit must be at least 1"));
        }

        Ok(Self { skip, limit })
    }

    pub fn skip(&self) -> usize {
        self.skip
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Clamp `[skip, skip + limit)` to a collection of `total` items
    pub fn range(&self, total: usize) -> std::ops::Range<usize> {
        let start = self.skip.min(total);
        let end = self.skip.saturating_add(self.limit).min(total);
        start..end
    }

    pub fn info(&self, total: usize) -> PaginationInfo {
        PaginationInfo {
            page: self.skip / self.limit + 1,
            per_page: self.limit,
            total,
            pages: total.div_ceil(self.limit),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

/// Pagination block returned alongside a page of items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub pages: usize,
}

/// One window of results
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: PaginationInfo,
}

/// Directory counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
}

impl UserStats {
    pub fn new(total: usize, active: usize) -> Self {
        Self {
            total,
            active,
            inactive: total.saturating_sub(active),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_limit_is_rejected() {
        assert!(matches!(
            PageRequest::new(0, 0),
            Err(DomainError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_first_page_info() {
        let request = PageRequest::new(0, 2).unwrap();

        assert_eq!(request.range(3), 0..2);
        assert_eq!(
            request.info(3),
            PaginationInfo {
                page: 1,
                per_page: 2,
                total: 3,
                pages: 2
            }
        );
    }

    #[test]
    fn test_partial_last_page() {
        let request = PageRequest::new(2, 2).unwrap();

        assert_eq!(request.range(3), 2..3);
        assert_eq!(request.info(3).page, 2);
    }

    #[test]
    fn test_out_of_range_skip_is_empty() {
        let request = PageRequest::new(10, 5).unwrap();

        assert!(request.range(3).is_empty());
        assert_eq!(request.info(3).page, 3);
        assert_eq!(request.info(3).pages, 1);
    }

    #[test]
    fn test_huge_limit_does_not_overflow() {
        let request = PageRequest::new(usize::MAX, usize::MAX).unwrap();
        assert!(request.range(3).is_empty());
    }

    #[test]
    fn test_empty_directory() {
        let info = PageRequest::default().info(0);
        assert_eq!(info.pages, 0);
        assert_eq!(info.page, 1);
        assert_eq!(info.per_page, DEFAULT_PAGE_LIMIT);
    }

    #[test]
    fn test_unaligned_skip_page_number() {
        // page is floor(skip / limit) + 1
        let request = PageRequest::new(3, 2).unwrap();
        assert_eq!(request.info(10).page, 2);
    }

    #[test]
    fn test_stats() {
        let stats = UserStats::new(3, 2);
        assert_eq!(stats.inactive, 1);
    }
}
