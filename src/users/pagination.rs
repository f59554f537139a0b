pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Normalized page window. Bad input falls back to defaults instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        let page = page
            .and_then(|p| p.parse::<i64>().ok())
            .filter(|p| *p > 0)
            .unwrap_or(1);
        let limit = limit
            .and_then(|l| l.parse::<i64>().ok())
            .filter(|l| (1..=MAX_PAGE_SIZE).contains(l))
            .unwrap_or(DEFAULT_PAGE_SIZE);
        Self { page, limit }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Never less than 1, even for an empty result.
    pub fn total_pages(&self, total: i64) -> i64 {
        let pages = (total + self.limit - 1) / self.limit;
        pages.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_absent() {
        assert_eq!(PageRequest::from_raw(None, None), PageRequest::default());
    }

    #[test]
    fn bad_page_resets_to_one() {
        for raw in ["0", "-3", "abc", "", "1.5"] {
            assert_eq!(PageRequest::from_raw(Some(raw), None).page, 1, "page={raw:?}");
        }
        assert_eq!(PageRequest::from_raw(Some("4"), None).page, 4);
    }

    #[test]
    fn bad_limit_resets_to_default() {
        for raw in ["0", "-1", "101", "1000", "ten", ""] {
            assert_eq!(
                PageRequest::from_raw(None, Some(raw)).limit,
                DEFAULT_PAGE_SIZE,
                "limit={raw:?}"
            );
        }
        assert_eq!(PageRequest::from_raw(None, Some("1")).limit, 1);
        assert_eq!(PageRequest::from_raw(None, Some("100")).limit, 100);
    }

    #[test]
    fn offset_follows_page() {
        let p = PageRequest::from_raw(Some("3"), Some("25"));
        assert_eq!(p.offset(), 50);
        assert_eq!(PageRequest::default().offset(), 0);
    }

    #[test]
    fn total_pages_rounds_up_with_floor_of_one() {
        let p = PageRequest::from_raw(None, Some("10"));
        assert_eq!(p.total_pages(0), 1);
        assert_eq!(p.total_pages(1), 1);
        assert_eq!(p.total_pages(10), 1);
        assert_eq!(p.total_pages(11), 2);
        assert_eq!(p.total_pages(15), 2);
        assert_eq!(p.total_pages(101), 11);
    }
}
