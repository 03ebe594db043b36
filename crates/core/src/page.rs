//! Paging results and limit clamping.

use serde::Serialize;

/// Ordering applied to a page by `updatedAt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Oldest first. Used by list.
    OldestFirst,
    /// Newest first. Used by find-by-field.
    NewestFirst,
}

/// One page of results and the total number of matches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

/// Clamp a requested page size. Zero asks for the default; a default of
/// zero leaves the page unbounded. Non-zero results never exceed `max`.
pub fn clamp_limit(requested: u64, default: u64, max: u64) -> u64 {
    let limit = if requested == 0 { default } else { requested };
    if limit == 0 || max == 0 {
        limit
    } else {
        limit.min(max)
    }
}
