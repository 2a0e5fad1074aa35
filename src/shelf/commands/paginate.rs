//! Page arithmetic over the filtered collection.
//!
//! Pages are 1-based. An empty collection has zero pages and its current page is 1.

use std::ops::Range;

/// Selectors with this many pages or fewer list every page.
const MAX_VISIBLE_PAGES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Brings `page` into `[1, total]`, or to 1 when there are no pages.
pub fn clamp_page(page: usize, total: usize) -> usize {
    page.clamp(1, total.max(1))
}

/// Index range of the page window within the filtered collection.
pub fn page_range(len: usize, page: usize, page_size: usize) -> Range<usize> {
    let start = page.saturating_sub(1).saturating_mul(page_size).min(len);
    let end = start.saturating_add(page_size).min(len);
    start..end
}

/// Resolves a page request. `None` when the clamped target is the current page.
pub fn navigate(current: usize, requested: i64, total: usize) -> Option<usize> {
    let upper = total.max(1) as i64;
    let target = requested.clamp(1, upper) as usize;
    (target != current).then_some(target)
}

/// Page numbers for a selector control.
///
/// Up to five pages are all listed. Beyond that the first and last page stay visible
/// around a window near the current page, and every gap becomes an ellipsis:
///
/// ```text
/// current ≤ 3        1 2 3 4 … N
/// current ≥ N − 2    1 … N-3 N-2 N-1 N
/// otherwise          1 … c-1 c c+1 … N
/// ```
pub fn page_numbers(current: usize, total: usize) -> Vec<PageItem> {
    if total <= MAX_VISIBLE_PAGES {
        return (1..=total).map(PageItem::Page).collect();
    }

    let mut items = Vec::with_capacity(7);
    if current <= 3 {
        items.extend((1..=4).map(PageItem::Page));
        items.push(PageItem::Ellipsis);
        items.push(PageItem::Page(total));
    } else if current >= total - 2 {
        items.push(PageItem::Page(1));
        items.push(PageItem::Ellipsis);
        items.extend((total - 3..=total).map(PageItem::Page));
    } else {
        items.push(PageItem::Page(1));
        items.push(PageItem::Ellipsis);
        items.extend((current - 1..=current + 1).map(PageItem::Page));
        items.push(PageItem::Ellipsis);
        items.push(PageItem::Page(total));
    }
    items
}
