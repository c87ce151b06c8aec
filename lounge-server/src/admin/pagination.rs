//! 1-based pagination over already-filtered lists

use shared::models::Page;

/// Slice `items` into the requested page
///
/// `page` 0 is treated as 1. A page past the end is empty but still reports
/// the real totals.
pub fn paginate<T>(items: Vec<T>, page: Option<u32>, page_size: Option<u32>, default_size: u32) -> Page<T> {
    let page = page.unwrap_or(1).max(1);
    let page_size = page_size.unwrap_or(default_size).max(1);
    let total = items.len();
    let total_pages = total.div_ceil(page_size as usize) as u32;

    let start = (page as usize - 1).saturating_mul(page_size as usize);
    let items = items
        .into_iter()
        .skip(start)
        .take(page_size as usize)
        .collect();

    Page {
        items,
        total,
        page,
        page_size,
        total_pages,
    }
}
