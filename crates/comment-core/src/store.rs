//! In-memory comment store.
//!
//! [`CommentStore`] is a cloneable handle: every clone points at the same
//! `Arc<RwLock<HashMap<..>>>`, so the server can hand one to each request
//! handler.  Locks are only held for the duration of a single method call and
//! never across an `.await`.
//!
//! A poisoned lock (a thread panicked while holding it) is reported as
//! [`StoreError::Poisoned`] instead of propagating the panic into every
//! subsequent request.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::domain::comment::Comment;
use crate::domain::page::{Page, Pagination};

/// Errors from store operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("comment store lock poisoned")]
    Poisoned,
}

/// Shared, thread-safe map of comments keyed by id.
#[derive(Debug, Clone, Default)]
pub struct CommentStore {
    inner: Arc<RwLock<HashMap<Uuid, Comment>>>,
}

impl CommentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `comment`, replacing any previous comment with the same id.
    pub fn insert(&self, comment: Comment) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        debug!(id = %comment.id, "storing comment");
        map.insert(comment.id, comment);
        Ok(())
    }

    pub fn get(&self, id: &Uuid) -> Result<Option<Comment>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.get(id).cloned())
    }

    /// Returns the requested window of the index, newest first.
    pub fn list(&self, pagination: &Pagination) -> Result<Page, StoreError> {
        let (total, entries) = {
            let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;
            (map.len(), map.values().cloned().collect::<Vec<_>>())
        };
        Ok(Page {
            total,
            entries: pagination.page(entries),
        })
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.inner.read().map_err(|_| StoreError::Poisoned)?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn comment(name: &str, age_secs: i64) -> Comment {
        Comment {
            id: Uuid::new_v4(),
            name: name.to_string(),
            text: "hello".to_string(),
            utc: Utc::now() - Duration::seconds(age_secs),
        }
    }

    #[test]
    fn test_insert_then_get_returns_comment() {
        // Arrange
        let store = CommentStore::new();
        let c = comment("Ada", 0);

        // Act
        store.insert(c.clone()).unwrap();

        // Assert
        assert_eq!(store.get(&c.id).unwrap(), Some(c));
    }

    #[test]
    fn test_get_unknown_id_returns_none() {
        let store = CommentStore::new();
        assert_eq!(store.get(&Uuid::new_v4()).unwrap(), None);
    }

    #[test]
    fn test_clones_share_state() {
        let store = CommentStore::new();
        let handle = store.clone();

        handle.insert(comment("Ada", 0)).unwrap();

        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_list_reports_total_independent_of_window() {
        let store = CommentStore::new();
        for i in 0..5 {
            store.insert(comment(&format!("user{i}"), i)).unwrap();
        }

        let page = store
            .list(&Pagination {
                offset: Some(0),
                limit: Some(2),
            })
            .unwrap();

        assert_eq!(page.total, 5);
        assert_eq!(page.entries.len(), 2);
        // user0 is the newest (age 0 seconds).
        assert_eq!(page.entries[0].name, "user0");
        assert_eq!(page.entries[1].name, "user1");
    }

    #[test]
    fn test_empty_store() {
        let store = CommentStore::new();
        assert!(store.is_empty().unwrap());
        let page = store.list(&Pagination::default()).unwrap();
        assert_eq!(page.total, 0);
        assert!(page.entries.is_empty());
    }

    #[test]
    fn test_concurrent_inserts_from_threads() {
        let store = CommentStore::new();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let s = store.clone();
                std::thread::spawn(move || s.insert(comment(&format!("t{i}"), i)).unwrap())
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(store.len().unwrap(), 8);
    }
}
