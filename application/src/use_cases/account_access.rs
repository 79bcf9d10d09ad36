//! Per-identity account storage capability.
//!
//! Remote/local branching by identity kind is expressed as a capability
//! object built once per session: authenticated sessions get a
//! remote-backed implementation, guest sessions get a local no-op one.
//! Callers never check the identity kind themselves.

use crate::ports::account_store::AccountStore;
use crate::ports::history_store::HistoryStore;
use crate::ports::persistence::PersistenceError;
use async_trait::async_trait;
use pdraft_domain::{HISTORY_LIMIT, HistoryDraft, HistoryView, Identity, Settings, SettingsPatch};
use std::sync::Arc;

/// Outcome of appending a history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppendOutcome {
    /// Persisted remotely under the returned id.
    Saved { id: String },
    /// Discarded; this session kind does not persist history.
    NotSaved,
}

/// Storage operations available to the current session.
#[async_trait]
pub trait AccountAccess: Send + Sync {
    async fn persist_credits(&self, credits: u64) -> Result<(), PersistenceError>;

    async fn persist_settings(&self, settings: &Settings) -> Result<(), PersistenceError>;

    /// The remotely stored settings record, if any.
    async fn remote_settings(&self) -> Result<Option<SettingsPatch>, PersistenceError>;

    async fn list_history(&self) -> Result<HistoryView, PersistenceError>;

    async fn append_history(&self, draft: &HistoryDraft)
    -> Result<AppendOutcome, PersistenceError>;

    async fn remove_history(&self, id: &str) -> Result<(), PersistenceError>;
}

/// Build the capability object for an identity.
pub fn account_access_for(
    identity: &Identity,
    accounts: Arc<dyn AccountStore>,
    history: Arc<dyn HistoryStore>,
) -> Arc<dyn AccountAccess> {
    match identity {
        Identity::Authenticated { uid, .. } => Arc::new(RemoteAccountAccess {
            uid: uid.clone(),
            accounts,
            history,
        }),
        Identity::Guest { .. } => Arc::new(GuestAccountAccess),
    }
}

/// Remote-backed access for authenticated sessions.
pub struct RemoteAccountAccess {
    uid: String,
    accounts: Arc<dyn AccountStore>,
    history: Arc<dyn HistoryStore>,
}

#[async_trait]
impl AccountAccess for RemoteAccountAccess {
    async fn persist_credits(&self, credits: u64) -> Result<(), PersistenceError> {
        self.accounts.update_credits(&self.uid, credits).await
    }

    async fn persist_settings(&self, settings: &Settings) -> Result<(), PersistenceError> {
        self.accounts.update_settings(&self.uid, settings).await
    }

    async fn remote_settings(&self) -> Result<Option<SettingsPatch>, PersistenceError> {
        Ok(self
            .accounts
            .fetch(&self.uid)
            .await?
            .map(|record| record.settings))
    }

    async fn list_history(&self) -> Result<HistoryView, PersistenceError> {
        let entries = self.history.list(&self.uid, HISTORY_LIMIT).await?;
        Ok(HistoryView::Entries(entries))
    }

    async fn append_history(
        &self,
        draft: &HistoryDraft,
    ) -> Result<AppendOutcome, PersistenceError> {
        let id = self.history.append(&self.uid, draft).await?;
        Ok(AppendOutcome::Saved { id })
    }

    async fn remove_history(&self, id: &str) -> Result<(), PersistenceError> {
        self.history.remove(&self.uid, id).await
    }
}

/// Local no-op access for guest sessions.
///
/// Every operation succeeds without reaching any remote store; history
/// is reported as unavailable and appends as not saved.
pub struct GuestAccountAccess;

#[async_trait]
impl AccountAccess for GuestAccountAccess {
    async fn persist_credits(&self, _credits: u64) -> Result<(), PersistenceError> {
        Ok(())
    }

    async fn persist_settings(&self, _settings: &Settings) -> Result<(), PersistenceError> {
        Ok(())
    }

    async fn remote_settings(&self) -> Result<Option<SettingsPatch>, PersistenceError> {
        Ok(None)
    }

    async fn list_history(&self) -> Result<HistoryView, PersistenceError> {
        Ok(HistoryView::Unavailable)
    }

    async fn append_history(
        &self,
        _draft: &HistoryDraft,
    ) -> Result<AppendOutcome, PersistenceError> {
        Ok(AppendOutcome::NotSaved)
    }

    async fn remove_history(&self, _id: &str) -> Result<(), PersistenceError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_guest_access_lists_unavailable() {
        let access = GuestAccountAccess;
        let view = access.list_history().await.unwrap();
        assert!(view.is_unavailable());
    }

    #[tokio::test]
    async fn test_guest_access_discards_appends() {
        let access = GuestAccountAccess;
        let draft = HistoryDraft::for_generation("t", "d", "latex", "url");
        let outcome = access.append_history(&draft).await.unwrap();
        assert_eq!(outcome, AppendOutcome::NotSaved);
    }

    #[tokio::test]
    async fn test_guest_access_settings_save_succeeds_without_remote() {
        let access = GuestAccountAccess;
        assert!(access.persist_settings(&Settings::default()).await.is_ok());
        assert!(access.remote_settings().await.unwrap().is_none());
    }
}
