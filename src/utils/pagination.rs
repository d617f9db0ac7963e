use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// One page of results, zero-based page index.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total_items: u64,
    pub total_pages: u64,
}
