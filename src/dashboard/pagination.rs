//! Client-side pagination over the cached transaction list
//!
//! Pure functions only; the controller owns the state they are applied to.

/// Derived pagination values for one list length, page and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page currently shown, always within `1..=total_pages`
    pub current_page: usize,
    /// Number of pages; 1 for an empty list
    pub total_pages: usize,
    pub page_size: usize,
    /// Index of the first visible item
    pub start: usize,
    /// One past the last visible item
    pub end: usize,
    pub total_items: usize,
}

impl Pagination {
    pub fn is_first_page(&self) -> bool {
        self.current_page == 1
    }

    pub fn is_last_page(&self) -> bool {
        self.current_page == self.total_pages
    }

    /// Whether `page` is a valid navigation target.
    pub fn contains(&self, page: usize) -> bool {
        (1..=self.total_pages).contains(&page)
    }
}

/// Number of pages needed for `len` items; at least 1.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Force `page` into `1..=total_pages`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

pub fn compute_pagination(len: usize, page: usize, page_size: usize) -> Pagination {
    let page_size = page_size.max(1);
    let total_pages = total_pages(len, page_size);
    let current_page = clamp_page(page, total_pages);
    let start = ((current_page - 1) * page_size).min(len);
    let end = (start + page_size).min(len);

    Pagination {
        current_page,
        total_pages,
        page_size,
        start,
        end,
        total_items: len,
    }
}

pub fn visible_slice<'a, T>(items: &'a [T], pagination: &Pagination) -> &'a [T] {
    let end = pagination.end.min(items.len());
    let start = pagination.start.min(end);
    &items[start..end]
}

/// One entry of the page selector shown under the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Page(usize),
    Gap,
}

/// Pages to offer for navigation: first, last, the neighbours of the current page,
/// and a gap marker where a run of pages is hidden.
pub fn page_window(current_page: usize, total_pages: usize) -> Vec<PageLink> {
    let mut links = Vec::new();
    for page in 1..=total_pages {
        let shown = page == 1 || page == total_pages || page.abs_diff(current_page) <= 1;
        if shown {
            links.push(PageLink::Page(page));
        } else if (page == 2 && current_page > 4)
            || (page + 1 == total_pages && current_page + 3 < total_pages)
        {
            links.push(PageLink::Gap);
        }
    }
    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageLink::{Gap, Page};

    const PAGE_SIZE: usize = 15;

    #[test]
    // totalPages is ceil(len / page size) for every non-empty list.
    fn test_total_pages_is_ceiling() {
        for len in 1..=200 {
            let expected = (len + PAGE_SIZE - 1) / PAGE_SIZE;
            assert_eq!(total_pages(len, PAGE_SIZE), expected, "len = {}", len);
        }
        assert_eq!(total_pages(0, PAGE_SIZE), 1);
    }

    #[test]
    // The current page stays within bounds whatever page is requested.
    fn test_current_page_always_in_bounds() {
        for len in 0..=100 {
            for page in 0..=10 {
                let p = compute_pagination(len, page, PAGE_SIZE);
                assert!(p.current_page >= 1);
                assert!(p.current_page <= p.total_pages.max(1));
                assert!(p.start <= p.end && p.end <= len);
            }
        }
    }

    #[test]
    fn test_thirty_two_items_last_page() {
        let items: Vec<usize> = (1..=32).collect();
        let p = compute_pagination(items.len(), 3, PAGE_SIZE);
        assert_eq!(p.total_pages, 3);
        assert_eq!(visible_slice(&items, &p), &[31, 32]);
        assert!(p.is_last_page());

        let first = compute_pagination(items.len(), 1, PAGE_SIZE);
        assert_eq!(visible_slice(&items, &first).len(), 15);
        assert!(first.is_first_page());
    }

    #[test]
    fn test_empty_list_has_one_empty_page() {
        let items: Vec<u8> = Vec::new();
        let p = compute_pagination(0, 4, PAGE_SIZE);
        assert_eq!(p.current_page, 1);
        assert_eq!(p.total_pages, 1);
        assert!(visible_slice(&items, &p).is_empty());
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(5, 3), 3);
        assert_eq!(clamp_page(2, 3), 2);
        assert_eq!(clamp_page(7, 0), 1);
    }

    #[test]
    fn test_page_window_small_lists_show_every_page() {
        assert_eq!(page_window(1, 1), vec![Page(1)]);
        assert_eq!(page_window(2, 3), vec![Page(1), Page(2), Page(3)]);
    }

    #[test]
    fn test_page_window_gaps() {
        assert_eq!(
            page_window(1, 10),
            vec![Page(1), Page(2), Gap, Page(10)]
        );
        assert_eq!(
            page_window(6, 10),
            vec![Page(1), Gap, Page(5), Page(6), Page(7), Gap, Page(10)]
        );
        assert_eq!(
            page_window(10, 10),
            vec![Page(1), Gap, Page(9), Page(10)]
        );
        // Close to the start: page 2 is hidden without a gap marker
        assert_eq!(
            page_window(4, 10),
            vec![Page(1), Page(3), Page(4), Page(5), Gap, Page(10)]
        );
    }
}
