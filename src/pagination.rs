//! Page windows and pagination-link markup over an ordered result list.

use std::ops::Range;

/// One token of the pagination index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    /// The page being shown, rendered as plain text.
    Current(usize),
    /// A clickable page number.
    Link(usize),
    /// One or more collapsed pages, rendered as `-`.
    Gap,
}

impl PageLink {
    pub fn to_html(&self) -> String {
        match self {
            PageLink::Current(page) => page.to_string(),
            PageLink::Link(page) => format!("<a href='javascript:loadPage({page})'>{page}</a>"),
            PageLink::Gap => "-".to_string(),
        }
    }
}

/// `max(1, ceil(count / page_size))`.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    count.div_ceil(page_size).max(1)
}

/// Index range of the results shown on `page` (1-indexed), clipped to `count`.
pub fn page_range(count: usize, page_size: usize, page: usize) -> Range<usize> {
    let start = page
        .saturating_sub(1)
        .saturating_mul(page_size)
        .min(count);
    let end = start.saturating_add(page_size).min(count);
    start..end
}

/// The page's slice of `results`.
pub fn page_slice<T>(results: &[T], page_size: usize, page: usize) -> &[T] {
    &results[page_range(results.len(), page_size, page)]
}

/// Tokens for pages `1..=total_pages`.
///
/// The first and last pages, multiples of 5 and pages within 2 of the
/// current page are links; runs of other pages collapse into one gap.
pub fn page_links(total_pages: usize, page: usize) -> Vec<PageLink> {
    let mut links = Vec::new();
    for i in 1..=total_pages {
        if i == page {
            links.push(PageLink::Current(i));
        } else if i == 1 || i == total_pages || i % 5 == 0 || i.abs_diff(page) < 3 {
            links.push(PageLink::Link(i));
        } else if links.last() != Some(&PageLink::Gap) {
            links.push(PageLink::Gap);
        }
    }
    links
}

/// Pagination block for the page, or an empty string when everything fits
/// on one page.
pub fn pagination_html(count: usize, page_size: usize, page: usize) -> String {
    if count <= page_size {
        return String::new();
    }
    let tokens: Vec<String> = page_links(total_pages(count, page_size), page)
        .iter()
        .map(PageLink::to_html)
        .collect();
    format!("[ {} ]", tokens.join(" | "))
}

/// `"No results"` or `"<count> results"`.
pub fn results_summary(count: usize) -> String {
    if count == 0 {
        "No results".to_string()
    } else {
        format!("{count} results")
    }
}

/// `"Page X of Y"`.
pub fn page_label(page: usize, total_pages: usize) -> String {
    format!("Page {page} of {total_pages}")
}
