//! History listing and deletion.
//!
//! Thin use case over the session's storage capability: listing is
//! newest-first and bounded, deletion is idempotent. Appending happens
//! inside the generation pipeline, not here.

use crate::ports::persistence::PersistenceError;
use crate::use_cases::session_manager::SessionContext;
use pdraft_domain::HistoryView;
use tracing::info;

pub struct HistoryService;

impl HistoryService {
    pub fn new() -> Self {
        Self
    }

    /// List the session's history. Guest sessions get the explicit
    /// `Unavailable` marker.
    pub async fn list(&self, ctx: &SessionContext) -> Result<HistoryView, PersistenceError> {
        ctx.access().list_history().await
    }

    /// Delete one entry by id. Confirmation is the caller's concern;
    /// removing an already-deleted id succeeds.
    pub async fn remove(&self, ctx: &SessionContext, id: &str) -> Result<(), PersistenceError> {
        ctx.access().remove_history(id).await?;
        info!("Deleted history entry {}", id);
        Ok(())
    }
}

impl Default for HistoryService {
    fn default() -> Self {
        Self::new()
    }
}
