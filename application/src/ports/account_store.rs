//! Account store port
//!
//! Per-user remote record holding the credit balance and the saved
//! generation settings. Guest sessions never touch this port.

use crate::ports::persistence::PersistenceError;
use async_trait::async_trait;
use pdraft_domain::{Settings, SettingsPatch};

/// The per-user document stored remotely.
#[derive(Debug, Clone)]
pub struct AccountRecord {
    pub credits: u64,
    pub settings: SettingsPatch,
}

impl AccountRecord {
    /// Record for a newly created account.
    pub fn new_account(credits: u64) -> Self {
        Self {
            credits,
            settings: Settings::default().into(),
        }
    }
}

/// Port for the remote per-user account store.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Fetch the account record, or `None` if the user has no profile yet.
    async fn fetch(&self, uid: &str) -> Result<Option<AccountRecord>, PersistenceError>;

    /// Create the profile for a new account.
    async fn initialize(
        &self,
        uid: &str,
        email: &str,
        display_name: &str,
        record: &AccountRecord,
    ) -> Result<(), PersistenceError>;

    async fn update_credits(&self, uid: &str, credits: u64) -> Result<(), PersistenceError>;

    async fn update_settings(&self, uid: &str, settings: &Settings)
    -> Result<(), PersistenceError>;
}
