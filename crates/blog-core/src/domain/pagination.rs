/// Page size used when the client sends none (or zero).
pub const DEFAULT_PAGE_SIZE: u64 = 10;
/// Upper bound for any requested page size.
pub const MAX_PAGE_SIZE: u64 = 50;
/// Largest offset a `BIGINT` bind parameter can carry.
const MAX_OFFSET: u64 = i64::MAX as u64;

/// A resolved `LIMIT`/`OFFSET` window over the published post list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: u64,
    pub offset: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_SIZE,
            offset: 0,
        }
    }
}

impl Pagination {
    /// Page-based window. Pages start at 1; anything lower is treated as 1.
    /// Pages far past the end saturate at the largest bindable offset.
    pub fn page(page: Option<i64>, page_size: Option<i64>) -> Self {
        let limit = clamp_page_size(page_size);
        let page = page.filter(|p| *p >= 1).unwrap_or(1) as u64;

        Self {
            limit,
            offset: (page - 1).saturating_mul(limit).min(MAX_OFFSET),
        }
    }

    /// Offset-based window. Negative offsets are treated as 0.
    pub fn offset(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self {
            limit: clamp_page_size(limit),
            offset: offset.filter(|o| *o > 0).unwrap_or(0) as u64,
        }
    }
}

fn clamp_page_size(requested: Option<i64>) -> u64 {
    match requested {
        Some(size) if size >= 1 => (size as u64).min(MAX_PAGE_SIZE),
        _ => DEFAULT_PAGE_SIZE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_defaults_and_clamps() {
        assert_eq!(Pagination::page(None, None).limit, 10);
        assert_eq!(Pagination::page(Some(1), Some(0)).limit, 10);
        assert_eq!(Pagination::page(Some(1), Some(-3)).limit, 10);
        assert_eq!(Pagination::page(Some(1), Some(1000)).limit, 50);
        assert_eq!(Pagination::page(Some(1), Some(25)).limit, 25);
    }

    #[test]
    fn test_page_to_offset() {
        assert_eq!(
            Pagination::page(Some(3), Some(20)),
            Pagination {
                limit: 20,
                offset: 40
            }
        );
        assert_eq!(Pagination::page(Some(0), Some(5)).offset, 0);
    }

    #[test]
    fn test_huge_page_offset_fits_bigint() {
        let page = Pagination::page(Some(i64::MAX), Some(10));
        assert_eq!(page.offset, i64::MAX as u64);
        assert!(i64::try_from(page.offset).is_ok());

        let page = Pagination::page(Some(i64::MAX), Some(MAX_PAGE_SIZE as i64));
        assert!(i64::try_from(page.offset).is_ok());
    }

    #[test]
    fn test_offset_based() {
        assert_eq!(
            Pagination::offset(Some(5), Some(15)),
            Pagination {
                limit: 5,
                offset: 15
            }
        );
        assert_eq!(Pagination::offset(Some(500), Some(-1)).offset, 0);
        assert_eq!(Pagination::offset(Some(500), None).limit, MAX_PAGE_SIZE);
    }
}
