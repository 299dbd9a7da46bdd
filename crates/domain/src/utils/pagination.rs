//! Sliding window of page links

/// Entry rendered by a pager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// One-based page number
    Page(u32),
    Ellipsis,
}

/// Compute the page links around `current` (one-based)
///
/// The first and last pages are always reachable; gaps are marked with an
/// ellipsis. Returns an empty list when there is at most one page, in which
/// case no pager is shown.
#[must_use]
pub fn page_window(current: u32, total: u32, max_pages: u32) -> Vec<PageItem> {
    if total <= 1 {
        return Vec::new();
    }

    let current = i64::from(current);
    let total_i = i64::from(total);
    let max_pages = i64::from(max_pages.max(1));
    let half = max_pages / 2;

    let mut start = (current - half).max(1);
    let mut end = (current + half).min(total_i);

    if current <= half {
        end = max_pages.min(total_i);
    }
    if current >= total_i - half {
        start = (total_i - max_pages + 1).max(1);
    }

    let mut items = Vec::new();

    if start > 1 {
        items.push(PageItem::Page(1));
        if start > 2 {
            items.push(PageItem::Ellipsis);
        }
    }

    items.extend((start..=end).filter_map(|page| u32::try_from(page).ok()).map(PageItem::Page));

    if end < total_i {
        if end < total_i - 1 {
            items.push(PageItem::Ellipsis);
        }
        items.push(PageItem::Page(total));
    }

    items
}
