//! Fixed-size, 1-based pagination.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cards per catalog page.
pub const PAGE_SIZE: usize = 24;

/// Requested page is outside `[1, total_pages]`.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("Page {requested} is out of range (1..={total_pages})")]
pub struct PageOutOfRange {
    pub requested: usize,
    pub total_pages: usize,
}

/// A navigation request from the pager controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "page", rename_all = "snake_case")]
pub enum PageMove {
    Next,
    Previous,
    JumpTo(usize),
}

/// One page of a sequence.
#[derive(Debug, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// Effective 1-based page number after bounds reconciliation.
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<'_, T> {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// `ceil(total_items / page_size)`; 0 for an empty sequence.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

/// Bring a requested page back within bounds.
///
/// With no pages the result is 1; past the end it is the last page.
pub fn reconcile_page(requested: usize, total_pages: usize) -> usize {
    if total_pages == 0 {
        1
    } else {
        requested.clamp(1, total_pages)
    }
}

/// Slice `items` into the page closest to `requested`.
pub fn paginate<T>(items: &[T], page_size: usize, requested: usize) -> Page<'_, T> {
    let total_items = items.len();
    let total = total_pages(total_items, page_size);
    let page = reconcile_page(requested, total);

    let slice = if total == 0 {
        &items[..0]
    } else {
        let start = (page - 1) * page_size;
        let end = (start + page_size).min(total_items);
        &items[start..end]
    };

    Page {
        items: slice,
        page,
        total_pages: total,
        total_items,
    }
}

/// Resolve a pager move, refusing targets outside `[1, total_pages]`.
pub fn navigate(current: usize, total_pages: usize, mv: PageMove) -> Result<usize, PageOutOfRange> {
    let requested = match mv {
        PageMove::Next => current.saturating_add(1),
        PageMove::Previous => current.saturating_sub(1),
        PageMove::JumpTo(n) => n,
    };

    if requested >= 1 && requested <= total_pages {
        Ok(requested)
    } else {
        Err(PageOutOfRange {
            requested,
            total_pages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 24), 0);
        assert_eq!(total_pages(1, 24), 1);
        assert_eq!(total_pages(24, 24), 1);
        assert_eq!(total_pages(25, 24), 2);
        assert_eq!(total_pages(50, 24), 3);
    }

    #[test]
    fn test_fifty_items_three_pages() {
        let items: Vec<u32> = (0..50).collect();
        let first = paginate(&items, PAGE_SIZE, 1);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.items.len(), 24);
        assert!(!first.has_previous());
        assert!(first.has_next());

        let last = paginate(&items, PAGE_SIZE, 3);
        assert_eq!(last.items, &[48, 49]);
        assert!(last.has_previous());
        assert!(!last.has_next());
    }

    #[test]
    fn test_pages_reconstruct_sequence() {
        for len in [0usize, 1, 23, 24, 25, 47, 48, 49, 100] {
            let items: Vec<usize> = (0..len).collect();
            let total = total_pages(len, PAGE_SIZE);
            assert_eq!(total == 0, items.is_empty());

            let rebuilt: Vec<usize> = (1..=total)
                .flat_map(|p| paginate(&items, PAGE_SIZE, p).items.to_vec())
                .collect();
            assert_eq!(rebuilt, items, "len {}", len);
        }
    }

    #[test]
    fn test_page_beyond_end_clamps_to_last() {
        let items: Vec<u32> = (0..30).collect();
        let page = paginate(&items, PAGE_SIZE, 9);
        assert_eq!(page.page, 2);
        assert_eq!(page.items.len(), 6);
    }

    #[test]
    fn test_empty_sequence_forces_page_one() {
        let items: Vec<u32> = vec![];
        let page = paginate(&items, PAGE_SIZE, 4);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
        assert!(!page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn test_page_zero_is_first_page() {
        let items: Vec<u32> = (0..30).collect();
        assert_eq!(paginate(&items, PAGE_SIZE, 0).page, 1);
    }

    #[test]
    fn test_reconcile_page() {
        assert_eq!(reconcile_page(5, 0), 1);
        assert_eq!(reconcile_page(5, 3), 3);
        assert_eq!(reconcile_page(2, 3), 2);
        assert_eq!(reconcile_page(0, 3), 1);
    }

    #[test]
    fn test_navigate_within_bounds() {
        assert_eq!(navigate(1, 3, PageMove::Next), Ok(2));
        assert_eq!(navigate(3, 3, PageMove::Previous), Ok(2));
        assert_eq!(navigate(1, 3, PageMove::JumpTo(3)), Ok(3));
    }

    #[test]
    fn test_navigate_out_of_bounds() {
        assert!(navigate(3, 3, PageMove::Next).is_err());
        assert!(navigate(1, 3, PageMove::Previous).is_err());
        assert!(navigate(1, 3, PageMove::JumpTo(0)).is_err());
        assert_eq!(
            navigate(1, 3, PageMove::JumpTo(4)),
            Err(PageOutOfRange {
                requested: 4,
                total_pages: 3
            })
        );
        assert!(navigate(1, 0, PageMove::Next).is_err());
    }
}
