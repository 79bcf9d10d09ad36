//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Backend API settings (generation/compilation endpoints)
    pub api: ApiConfig,
    /// Identity provider settings
    pub auth: AuthConfig,
    /// Structured transcript log settings
    pub transcript: TranscriptConfig,
}

impl FileConfig {
    /// Base URL for the identity provider; falls back to the API base.
    pub fn auth_base_url(&self) -> &str {
        self.auth.base_url.as_deref().unwrap_or(&self.api.base_url)
    }
}

/// Backend API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the generation/compilation backend. Relative artifact
    /// references are resolved against this.
    pub base_url: String,
    /// Request timeout for remote calls. The pipeline has no retries, so
    /// this bounds how long a single run can hang.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_secs: 90,
        }
    }
}

/// Identity provider settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Base URL of the identity provider; defaults to the API base.
    pub base_url: Option<String>,
}

/// Structured transcript log settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptConfig {
    /// Directory for JSONL transcript logs; disabled when unset.
    pub log_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FileConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert_eq!(config.api.timeout_secs, 90);
        assert!(config.transcript.log_dir.is_none());
    }

    #[test]
    fn test_auth_base_falls_back_to_api_base() {
        let config = FileConfig::default();
        assert_eq!(config.auth_base_url(), "http://localhost:5000");

        let config = FileConfig {
            auth: AuthConfig {
                base_url: Some("https://auth.example.com".to_string()),
            },
            ..Default::default()
        };
        assert_eq!(config.auth_base_url(), "https://auth.example.com");
    }

    #[test]
    fn test_partial_toml_parses() {
        let config: FileConfig = toml_from_str(
            r#"
            [api]
            base_url = "https://api.example.com"
            "#,
        );
        assert_eq!(config.api.base_url, "https://api.example.com");
        // Unspecified fields keep their defaults
        assert_eq!(config.api.timeout_secs, 90);
    }

    fn toml_from_str(s: &str) -> FileConfig {
        use figment::{
            Figment,
            providers::{Format, Toml},
        };
        Figment::new()
            .merge(figment::providers::Serialized::defaults(
                FileConfig::default(),
            ))
            .merge(Toml::string(s))
            .extract()
            .unwrap()
    }
}
