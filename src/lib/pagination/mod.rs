//! Splitting post listings by `postPerIndex` and `postPerPage`.

use crate::config::SiteSettings;

/// Number of listing pages for `total` posts. An empty listing still has
/// one (empty) page.
pub fn page_count(total: usize, per_page: u32) -> usize {
    let per_page = (per_page as usize).max(1);
    total.div_ceil(per_page).max(1)
}

/// Items on the 1-based `page`. Out of range pages are empty.
pub fn page_slice<T>(items: &[T], per_page: u32, page: usize) -> &[T] {
    let per_page = (per_page as usize).max(1);
    let Some(start) = page
        .checked_sub(1)
        .and_then(|p| p.checked_mul(per_page))
        .filter(|&start| start < items.len())
    else {
        return &[];
    };
    let end = start.saturating_add(per_page).min(items.len());
    &items[start..end]
}

impl SiteSettings {
    pub fn page_count(&self, total: usize) -> usize {
        page_count(total, self.post_per_page)
    }

    pub fn page<'a, T>(&self, items: &'a [T], page: usize) -> &'a [T] {
        page_slice(items, self.post_per_page, page)
    }

    /// Posts shown on the home page.
    pub fn index_slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let n = (self.post_per_index as usize).min(items.len());
        &items[..n]
    }
}
