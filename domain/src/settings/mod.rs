//! Document generation settings

use serde::{Deserialize, Serialize};

/// User-tunable generation parameters (Value Object)
///
/// Serialized with camelCase names to match both the local cache file and
/// the remote account record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub font_style: String,
    pub font_size: String,
    pub language: String,
    pub document_type: String,
    pub max_tokens: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font_style: "times".to_string(),
            font_size: "12pt".to_string(),
            language: "english".to_string(),
            document_type: "research-paper".to_string(),
            max_tokens: 4000,
        }
    }
}

/// A partial settings record, as stored in the local cache or the remote
/// account document. Missing fields fall back per-field on merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    pub font_style: Option<String>,
    pub font_size: Option<String>,
    pub language: Option<String>,
    pub document_type: Option<String>,
    pub max_tokens: Option<u32>,
}

impl Settings {
    /// Apply a partial record over this one; present fields win.
    pub fn merged_with(&self, patch: &SettingsPatch) -> Settings {
        Settings {
            font_style: patch.font_style.clone().unwrap_or_else(|| self.font_style.clone()),
            font_size: patch.font_size.clone().unwrap_or_else(|| self.font_size.clone()),
            language: patch.language.clone().unwrap_or_else(|| self.language.clone()),
            document_type: patch
                .document_type
                .clone()
                .unwrap_or_else(|| self.document_type.clone()),
            max_tokens: patch.max_tokens.unwrap_or(self.max_tokens),
        }
    }
}

impl From<Settings> for SettingsPatch {
    fn from(s: Settings) -> Self {
        Self {
            font_style: Some(s.font_style),
            font_size: Some(s.font_size),
            language: Some(s.language),
            document_type: Some(s.document_type),
            max_tokens: Some(s.max_tokens),
        }
    }
}
