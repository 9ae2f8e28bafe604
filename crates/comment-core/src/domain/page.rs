//! Index pagination.

use serde::{Deserialize, Serialize};

use super::comment::Comment;

/// Number of entries shown when the query does not specify `limit`.
pub const DEFAULT_PAGE_LIMIT: usize = 100;

/// Query parameters of the comment index (`?offset=..&limit=..`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

/// One page of the index together with the store's total size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Number of comments in the store, not on this page.
    pub total: usize,
    pub entries: Vec<Comment>,
}

impl Pagination {
    pub fn offset(&self) -> usize {
        self.offset.unwrap_or(0)
    }

    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_PAGE_LIMIT)
    }

    /// Orders `entries` newest first and cuts out the requested window.
    ///
    /// Sorting happens before the window is applied, so page boundaries are
    /// stable regardless of the order the entries were collected in.  Equal
    /// timestamps are ordered by id.
    pub fn page(&self, mut entries: Vec<Comment>) -> Vec<Comment> {
        entries.sort_by(|a, b| b.utc.cmp(&a.utc).then_with(|| a.id.cmp(&b.id)));
        entries
            .into_iter()
            .skip(self.offset())
            .take(self.limit())
            .collect()
    }
}
