//! Ranked search result and the raw upstream page it is built from.

use super::repository::{RepositoryRecord, ScoredRepository};

/// One page of upstream search results, in upstream order.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage {
    /// Total number of matches reported upstream, independent of page size.
    pub total_count: i64,
    pub items: Vec<RepositoryRecord>,
}

/// Repositories of one page, ranked by popularity score.
///
/// `items` is sorted by score descending. Equal scores keep their upstream order.
#[derive(Debug, Clone, PartialEq)]
pub struct PopularityResult {
    pub total_count: i64,
    pub items: Vec<ScoredRepository>,
}

impl PopularityResult {
    /// Number of items actually returned in this page.
    pub fn count(&self) -> usize {
        self.items.len()
    }
}
