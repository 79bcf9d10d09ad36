//! History store port
//!
//! Per-user ordered sub-collection of completed generations, queryable
//! newest first.

use crate::ports::persistence::PersistenceError;
use async_trait::async_trait;
use pdraft_domain::{HistoryDraft, HistoryEntry};

/// Port for the remote per-user history store.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// List entries newest first, bounded to `limit`.
    async fn list(&self, uid: &str, limit: usize) -> Result<Vec<HistoryEntry>, PersistenceError>;

    /// Append a new entry; the store assigns and returns its id.
    async fn append(&self, uid: &str, draft: &HistoryDraft) -> Result<String, PersistenceError>;

    /// Delete an entry by id. Removing an already-deleted id succeeds.
    async fn remove(&self, uid: &str, id: &str) -> Result<(), PersistenceError>;
}
