//! Settings load/save/reset.
//!
//! Settings merge in layers: hard defaults, then the local cached record,
//! then (for authenticated sessions) the remote record. Remote wins on
//! conflict. Saves always hit the local cache; only authenticated
//! sessions also write remotely — guest saves are local-only and still
//! succeed.

use crate::ports::persistence::PersistenceError;
use crate::ports::settings_cache::SettingsCache;
use crate::use_cases::session_manager::SessionContext;
use pdraft_domain::Settings;
use std::sync::Arc;
use tracing::warn;

pub struct SettingsService {
    cache: Arc<dyn SettingsCache>,
}

impl SettingsService {
    pub fn new(cache: Arc<dyn SettingsCache>) -> Self {
        Self { cache }
    }

    /// Load the effective settings for the current session (or for no
    /// session at all, e.g. at startup before sign-in).
    ///
    /// A failing source is skipped with a warning; the merge continues
    /// from whatever layers are readable.
    pub async fn load(&self, ctx: Option<&SessionContext>) -> Settings {
        let mut settings = Settings::default();

        match self.cache.load() {
            Ok(Some(patch)) => settings = settings.merged_with(&patch),
            Ok(None) => {}
            Err(e) => warn!("Failed to read settings cache: {}", e),
        }

        if let Some(ctx) = ctx {
            match ctx.access().remote_settings().await {
                Ok(Some(patch)) => settings = settings.merged_with(&patch),
                Ok(None) => {}
                Err(e) => warn!("Falling back to cached settings: {}", e),
            }
        }

        settings
    }

    /// Persist settings locally, and remotely for sessions whose storage
    /// capability is remote-backed.
    pub async fn save(
        &self,
        settings: &Settings,
        ctx: Option<&SessionContext>,
    ) -> Result<(), PersistenceError> {
        self.cache.store(settings)?;
        if let Some(ctx) = ctx {
            ctx.access().persist_settings(settings).await?;
        }
        Ok(())
    }

    /// The fixed default record. Nothing is persisted until `save`.
    pub fn reset(&self) -> Settings {
        Settings::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::account_access::GuestAccountAccess;
    use pdraft_domain::{Session, SettingsPatch};
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockCache {
        record: Mutex<Option<SettingsPatch>>,
        stores: Mutex<Vec<Settings>>,
    }

    impl SettingsCache for MockCache {
        fn load(&self) -> Result<Option<SettingsPatch>, PersistenceError> {
            Ok(self.record.lock().unwrap().clone())
        }

        fn store(&self, settings: &Settings) -> Result<(), PersistenceError> {
            self.stores.lock().unwrap().push(settings.clone());
            *self.record.lock().unwrap() = Some(settings.clone().into());
            Ok(())
        }
    }

    fn guest_context() -> SessionContext {
        SessionContext::new(Session::guest("guest-1"), Arc::new(GuestAccountAccess))
    }

    #[tokio::test]
    async fn test_load_without_session_uses_defaults() {
        let service = SettingsService::new(Arc::new(MockCache::default()));
        let settings = service.load(None).await;
        assert_eq!(settings, Settings::default());
    }

    #[tokio::test]
    async fn test_load_merges_cache_over_defaults() {
        let cache = Arc::new(MockCache::default());
        *cache.record.lock().unwrap() = Some(SettingsPatch {
            language: Some("german".to_string()),
            ..Default::default()
        });
        let service = SettingsService::new(cache);

        let settings = service.load(None).await;
        assert_eq!(settings.language, "german");
        assert_eq!(settings.font_style, "times");
    }

    #[tokio::test]
    async fn test_remote_record_wins_over_cache() {
        struct RemoteSettingsAccess;

        #[async_trait::async_trait]
        impl crate::use_cases::account_access::AccountAccess for RemoteSettingsAccess {
            async fn persist_credits(&self, _credits: u64) -> Result<(), PersistenceError> {
                Ok(())
            }

            async fn persist_settings(
                &self,
                _settings: &Settings,
            ) -> Result<(), PersistenceError> {
                Ok(())
            }

            async fn remote_settings(&self) -> Result<Option<SettingsPatch>, PersistenceError> {
                Ok(Some(SettingsPatch {
                    language: Some("french".to_string()),
                    ..Default::default()
                }))
            }

            async fn list_history(
                &self,
            ) -> Result<pdraft_domain::HistoryView, PersistenceError> {
                Ok(pdraft_domain::HistoryView::Entries(vec![]))
            }

            async fn append_history(
                &self,
                _draft: &pdraft_domain::HistoryDraft,
            ) -> Result<crate::use_cases::account_access::AppendOutcome, PersistenceError>
            {
                Ok(crate::use_cases::account_access::AppendOutcome::NotSaved)
            }

            async fn remove_history(&self, _id: &str) -> Result<(), PersistenceError> {
                Ok(())
            }
        }

        let cache = Arc::new(MockCache::default());
        *cache.record.lock().unwrap() = Some(SettingsPatch {
            language: Some("german".to_string()),
            font_size: Some("10pt".to_string()),
            ..Default::default()
        });
        let service = SettingsService::new(cache);
        let ctx = SessionContext::new(
            Session::new(
                pdraft_domain::Identity::Authenticated {
                    uid: "u-1".to_string(),
                    email: "ada@example.com".to_string(),
                    display_name: "Ada".to_string(),
                },
                1_000,
            ),
            Arc::new(RemoteSettingsAccess),
        );

        let settings = service.load(Some(&ctx)).await;
        // Remote wins on conflict, cache fills the rest
        assert_eq!(settings.language, "french");
        assert_eq!(settings.font_size, "10pt");
        assert_eq!(settings.font_style, "times");
    }

    #[tokio::test]
    async fn test_reset_then_save_persists_default_record() {
        let cache = Arc::new(MockCache::default());
        let service = SettingsService::new(cache.clone());

        let defaults = service.reset();
        service.save(&defaults, None).await.unwrap();

        let stored = cache.stores.lock().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0], Settings::default());
    }

    #[tokio::test]
    async fn test_guest_save_is_local_only_and_succeeds() {
        let cache = Arc::new(MockCache::default());
        let service = SettingsService::new(cache.clone());
        let ctx = guest_context();

        // GuestAccountAccess has no remote side; a save must still succeed
        service
            .save(&Settings::default(), Some(&ctx))
            .await
            .unwrap();
        assert_eq!(cache.stores.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_guest_load_ignores_remote_layer() {
        let cache = Arc::new(MockCache::default());
        let service = SettingsService::new(cache);
        let ctx = guest_context();

        let settings = service.load(Some(&ctx)).await;
        assert_eq!(settings, Settings::default());
    }
}
