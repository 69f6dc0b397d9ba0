//! Page-based pagination.

/// Requested page window. Page numbering starts at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Build a page request from optional query values. Missing or zero
    /// values fall back to the defaults.
    #[must_use]
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            page: match page {
                Some(page) if page > 0 => page,
                _ => DEFAULT_PAGE,
            },
            limit: match limit {
                Some(limit) if limit > 0 => limit,
                _ => DEFAULT_LIMIT,
            },
        }
    }

    #[must_use]
    pub fn sql_limit(&self) -> i64 {
        i64::from(self.limit)
    }

    #[must_use]
    pub fn sql_offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1)) * i64::from(self.limit)
    }
}

/// One page of results plus the counts needed to render page links.
#[derive(Debug, Clone)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub pages: u64,
}

impl<T> Paginated<T> {
    #[must_use]
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            page: request.page,
            limit: request.limit,
            total,
            pages: total.div_ceil(u64::from(request.limit)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_applied_for_missing_values() {
        assert_eq!(PageRequest::new(None, None), PageRequest::default());
    }

    #[test]
    fn zero_values_fall_back_to_defaults() {
        let request = PageRequest::new(Some(0), Some(0));

        assert_eq!(request.page, DEFAULT_PAGE);
        assert_eq!(request.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn offset_is_zero_based() {
        let request = PageRequest::new(Some(3), Some(10));

        assert_eq!(request.sql_offset(), 20);
        assert_eq!(request.sql_limit(), 10);
    }

    #[test]
    fn page_count_rounds_up() {
        let page = Paginated::new(vec![1, 2, 3], PageRequest::new(Some(1), Some(10)), 21);

        assert_eq!(page.pages, 3);
        assert_eq!(page.total, 21);
    }

    #[test]
    fn page_count_is_zero_for_no_results() {
        let page: Paginated<u8> = Paginated::new(vec![], PageRequest::default(), 0);

        assert_eq!(page.pages, 0);
    }
}
