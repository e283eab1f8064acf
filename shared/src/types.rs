//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Rows per page of the inventory list
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Pagination parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// Paginated response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: u32,
    pub per_page: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

/// Slice one page out of `items`. The requested page is clamped into the
/// available range, so asking past the end returns the last page.
pub fn paginate<T: Clone>(items: &[T], pagination: &Pagination) -> PaginatedResponse<T> {
    let per_page = pagination.per_page.max(1);
    let total_items = items.len() as u64;
    let total_pages = total_items.div_ceil(u64::from(per_page)) as u32;
    let page = pagination.page.clamp(1, total_pages.max(1));

    let start = ((page - 1) as usize).saturating_mul(per_page as usize).min(items.len());
    let end = start.saturating_add(per_page as usize).min(items.len());

    PaginatedResponse {
        data: items[start..end].to_vec(),
        pagination: PaginationMeta {
            page,
            per_page,
            total_items,
            total_pages,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: u32) -> Vec<u32> {
        (1..=n).collect()
    }

    #[test]
    fn test_first_page_defaults_to_ten_rows() {
        let page = paginate(&numbers(23), &Pagination::default());
        assert_eq!(page.data, numbers(10));
        assert_eq!(
            page.pagination,
            PaginationMeta {
                page: 1,
                per_page: 10,
                total_items: 23,
                total_pages: 3
            }
        );
    }

    #[test]
    fn test_last_page_is_partial() {
        let page = paginate(&numbers(23), &Pagination { page: 3, per_page: 10 });
        assert_eq!(page.data, vec![21, 22, 23]);
    }

    #[test]
    fn test_page_is_clamped() {
        let page = paginate(&numbers(23), &Pagination { page: 9, per_page: 10 });
        assert_eq!(page.pagination.page, 3);
        let page = paginate(&numbers(23), &Pagination { page: 0, per_page: 10 });
        assert_eq!(page.pagination.page, 1);
    }

    #[test]
    fn test_empty_collection() {
        let page = paginate::<u32>(&[], &Pagination::default());
        assert!(page.data.is_empty());
        assert_eq!(page.pagination.total_pages, 0);
        assert_eq!(page.pagination.page, 1);
    }
}
