use serde::{Deserialize, Serialize};

/// Page/limit query parameters shared by every list endpoint
#[derive(Debug, Clone, Copy, Deserialize, Default)]
pub struct PaginationParams {
    /// 1-based page number
    pub page: Option<u64>,
    /// Items per page
    pub limit: Option<u64>,
}

impl PaginationParams {
    pub const DEFAULT_LIMIT: u64 = 20;
    pub const MAX_LIMIT: u64 = 100;

    pub fn new(page: Option<u64>, limit: Option<u64>) -> Self {
        Self { page, limit }
    }

    /// Clamped so that `skip()` always fits the driver's signed skip
    pub fn page(&self) -> u64 {
        let max_page = (i64::MAX as u64) / self.limit() + 1;
        self.page.unwrap_or(1).clamp(1, max_page)
    }

    pub fn limit(&self) -> u64 {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT)
    }

    pub fn skip(&self) -> u64 {
        (self.page() - 1) * self.limit()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PaginationMeta {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationMeta {
    pub fn new(params: &PaginationParams, total: u64) -> Self {
        let page = params.page();
        let limit = params.limit();
        let total_pages = total.div_ceil(limit);

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Paginated<T: Serialize> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T: Serialize> Paginated<T> {
    pub fn new(data: Vec<T>, params: &PaginationParams, total: u64) -> Self {
        Self {
            data,
            pagination: PaginationMeta::new(params, total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PaginationParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 20);
        assert_eq!(params.skip(), 0);
    }

    #[test]
    fn test_limit_is_clamped() {
        assert_eq!(PaginationParams::new(None, Some(500)).limit(), 100);
        assert_eq!(PaginationParams::new(None, Some(0)).limit(), 1);
        assert_eq!(PaginationParams::new(Some(0), None).page(), 1);
    }

    #[test]
    fn test_skip() {
        let params = PaginationParams::new(Some(3), Some(25));
        assert_eq!(params.skip(), 50);
    }

    #[test]
    fn test_huge_page_skip_fits_i64() {
        for limit in [1, 20, 100] {
            let params = PaginationParams::new(Some(u64::MAX), Some(limit));
            assert!(params.skip() <= i64::MAX as u64);
            assert!(params.page() > 1);
        }

        let meta = PaginationMeta::new(&PaginationParams::new(Some(u64::MAX), None), 5);
        assert!(!meta.has_next);
        assert!(meta.has_prev);
    }

    #[test]
    fn test_meta() {
        let params = PaginationParams::new(Some(2), Some(10));
        let meta = PaginationMeta::new(&params, 25);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next);
        assert!(meta.has_prev);

        let last = PaginationMeta::new(&PaginationParams::new(Some(3), Some(10)), 25);
        assert!(!last.has_next);

        let empty = PaginationMeta::new(&PaginationParams::default(), 0);
        assert_eq!(empty.total_pages, 0);
        assert!(!empty.has_next);
        assert!(!empty.has_prev);
    }
}
