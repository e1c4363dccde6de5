//! Pagination math for the browse view

use serde::{Deserialize, Serialize};

/// How many numbered links the page strip shows around the current page
pub const MAX_PAGES_TO_SHOW: u32 = 5;

/// An entry of the page strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLink {
    Page(u32),
    Ellipsis,
}

/// Position within the paginated catalog (pages are 1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: u32,
    pub page_size: u32,
    pub total_count: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current_page: 1,
            page_size: 20,
            total_count: 0,
        }
    }
}

impl Pagination {
    pub fn new(current_page: u32, page_size: u32, total_count: u64) -> Self {
        Self {
            current_page: current_page.max(1),
            page_size,
            total_count,
        }
    }

    /// Number of pages needed to show `total_count` records
    pub fn total_pages(&self) -> u32 {
        if self.page_size == 0 {
            return 0;
        }
        self.total_count.div_ceil(u64::from(self.page_size)) as u32
    }

    /// Offset of the first record on the current page
    pub fn offset(&self) -> u32 {
        self.current_page.saturating_sub(1).saturating_mul(self.page_size)
    }

    /// Whether `page` is a valid navigation target from the current page
    pub fn can_go_to(&self, page: u32) -> bool {
        page >= 1 && page <= self.total_pages() && page != self.current_page
    }

    /// Page strip: a window of numbered pages around the current one, anchored
    /// by the first and last page with ellipses over any gap.
    pub fn page_numbers(&self) -> Vec<PageLink> {
        let total = self.total_pages();
        if total <= MAX_PAGES_TO_SHOW {
            return (1..=total).map(PageLink::Page).collect();
        }

        // a page past the end draws the strip of the last page
        let current = self.current_page.min(total);
        let mut start = current.saturating_sub(MAX_PAGES_TO_SHOW / 2).max(1);
        let end = start.saturating_add(MAX_PAGES_TO_SHOW - 1).min(total);
        if end - start + 1 < MAX_PAGES_TO_SHOW {
            start = end.saturating_sub(MAX_PAGES_TO_SHOW - 1).max(1);
        }

        let mut pages = Vec::with_capacity(MAX_PAGES_TO_SHOW as usize + 4);
        if start > 1 {
            pages.push(PageLink::Page(1));
            if start > 2 {
                pages.push(PageLink::Ellipsis);
            }
        }
        pages.extend((start..=end).map(PageLink::Page));
        if end < total {
            if end < total - 1 {
                pages.push(PageLink::Ellipsis);
            }
            pages.push(PageLink::Page(total));
        }
        pages
    }
}
