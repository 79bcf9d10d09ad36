//! JSON file settings cache
//!
//! Persists the settings record to a JSON file under the user config
//! directory. This is the fallback source when the remote store is
//! unavailable and the only persistence target for guest sessions.

use pdraft_application::{PersistenceError, SettingsCache};
use pdraft_domain::{Settings, SettingsPatch};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings cache backed by a single JSON file.
pub struct FileSettingsCache {
    path: PathBuf,
}

impl FileSettingsCache {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The default cache location: `~/.config/pdraft/settings.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("pdraft").join("settings.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsCache for FileSettingsCache {
    fn load(&self) -> Result<Option<SettingsPatch>, PersistenceError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| PersistenceError::Io(e.to_string()))?;
        let patch = serde_json::from_str(&content)
            .map_err(|e| PersistenceError::Serialization(e.to_string()))?;
        Ok(Some(patch))
    }

    fn store(&self, settings: &Settings) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PersistenceError::Io(e.to_string()))?;
        }
        let patch: SettingsPatch = settings.clone().into();
        let content = serde_json::to_string_pretty(&patch)
            .map_err(|e| PersistenceError::Serialization(e.to_string()))?;
        std::fs::write(&self.path, content).map_err(|e| PersistenceError::Io(e.to_string()))?;
        debug!("Saved settings to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileSettingsCache::new(dir.path().join("settings.json"));
        assert!(cache.load().unwrap().is_none());
    }

    #[test]
    fn test_store_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileSettingsCache::new(dir.path().join("settings.json"));

        let settings = Settings {
            language: "german".to_string(),
            ..Settings::default()
        };
        cache.store(&settings).unwrap();

        let patch = cache.load().unwrap().unwrap();
        assert_eq!(patch.language.as_deref(), Some("german"));
        assert_eq!(patch.max_tokens, Some(4000));
    }

    #[test]
    fn test_store_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileSettingsCache::new(dir.path().join("nested").join("settings.json"));
        cache.store(&Settings::default()).unwrap();
        assert!(cache.path().exists());
    }

    #[test]
    fn test_partial_record_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"fontStyle": "helvetica"}"#).unwrap();

        let cache = FileSettingsCache::new(&path);
        let patch = cache.load().unwrap().unwrap();
        assert_eq!(patch.font_style.as_deref(), Some("helvetica"));
        assert!(patch.language.is_none());
    }
}
