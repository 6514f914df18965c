//! The uniform page contract every catalog client normalizes into.

use serde::Serialize;

/// Fixed page size exposed to callers, across every category.
pub const PAGE_SIZE: u32 = 4;

/// One normalized page of search results.
///
/// `results` never holds more than [`PAGE_SIZE`] items and `total_pages` is
/// always computed against [`PAGE_SIZE`], regardless of how the upstream
/// paginates.
#[derive(Debug, Clone, Serialize)]
pub struct SearchPage<T> {
    pub results: Vec<T>,
    pub total_pages: u32,
}

/// Total caller-facing pages for an upstream result count.
pub fn total_pages(upstream_total: u32) -> u32 {
    upstream_total.div_ceil(PAGE_SIZE)
}
