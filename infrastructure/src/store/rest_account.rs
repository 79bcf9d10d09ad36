//! REST adapter for the per-user account store
//!
//! The account record lives at `{base}/api/users/{uid}`:
//! `{ "email", "displayName", "tokens", "settings" }`. The credit
//! balance keeps its historical wire name `tokens`.

use crate::store::store_error;
use async_trait::async_trait;
use pdraft_application::{AccountRecord, AccountStore, PersistenceError};
use pdraft_domain::{NEW_ACCOUNT_CREDITS, Settings, SettingsPatch};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InitializeRequest<'a> {
    email: &'a str,
    display_name: &'a str,
    tokens: u64,
    settings: &'a SettingsPatch,
}

#[derive(Serialize)]
struct CreditsPatch {
    tokens: u64,
}

#[derive(Serialize)]
struct SettingsUpdate<'a> {
    settings: &'a Settings,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountDocument {
    #[serde(default)]
    tokens: Option<u64>,
    #[serde(default)]
    settings: SettingsPatch,
}

impl From<AccountDocument> for AccountRecord {
    fn from(doc: AccountDocument) -> Self {
        Self {
            // A record without a balance is a profile that never generated;
            // it still gets the full starting allowance.
            credits: doc.tokens.unwrap_or(NEW_ACCOUNT_CREDITS),
            settings: doc.settings,
        }
    }
}

/// Account store adapter over `{base}/api/users/{uid}`.
pub struct RestAccountStore {
    client: reqwest::Client,
    base_url: String,
}

impl RestAccountStore {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn user_url(&self, uid: &str) -> String {
        format!("{}/api/users/{}", self.base_url, uid)
    }
}

#[async_trait]
impl AccountStore for RestAccountStore {
    async fn fetch(&self, uid: &str) -> Result<Option<AccountRecord>, PersistenceError> {
        let response = self
            .client
            .get(self.user_url(uid))
            .send()
            .await
            .map_err(|e| PersistenceError::RequestFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(store_error(response).await);
        }

        let doc: AccountDocument = response
            .json()
            .await
            .map_err(|e| PersistenceError::Serialization(e.to_string()))?;

        Ok(Some(doc.into()))
    }

    async fn initialize(
        &self,
        uid: &str,
        email: &str,
        display_name: &str,
        record: &AccountRecord,
    ) -> Result<(), PersistenceError> {
        debug!("Initializing account profile for {}", uid);
        let response = self
            .client
            .put(self.user_url(uid))
            .json(&InitializeRequest {
                email,
                display_name,
                tokens: record.credits,
                settings: &record.settings,
            })
            .send()
            .await
            .map_err(|e| PersistenceError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(store_error(response).await);
        }
        Ok(())
    }

    async fn update_credits(&self, uid: &str, credits: u64) -> Result<(), PersistenceError> {
        let response = self
            .client
            .patch(self.user_url(uid))
            .json(&CreditsPatch { tokens: credits })
            .send()
            .await
            .map_err(|e| PersistenceError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(store_error(response).await);
        }
        Ok(())
    }

    async fn update_settings(
        &self,
        uid: &str,
        settings: &Settings,
    ) -> Result<(), PersistenceError> {
        let response = self
            .client
            .patch(self.user_url(uid))
            .json(&SettingsUpdate { settings })
            .send()
            .await
            .map_err(|e| PersistenceError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(store_error(response).await);
        }
        Ok(())
    }
}
