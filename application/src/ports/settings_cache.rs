//! Local settings cache port
//!
//! A key-value record that survives process restart. It is the fallback
//! source when the remote store is unavailable, and the only persistence
//! target for guest sessions.

use crate::ports::persistence::PersistenceError;
use pdraft_domain::{Settings, SettingsPatch};

/// Port for the locally persisted settings record.
pub trait SettingsCache: Send + Sync {
    /// Load the cached record, or `None` if nothing has been saved yet.
    fn load(&self) -> Result<Option<SettingsPatch>, PersistenceError>;

    /// Persist the full settings record.
    fn store(&self, settings: &Settings) -> Result<(), PersistenceError>;
}
