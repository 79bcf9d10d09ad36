//! Infrastructure layer for pdraft
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod auth;
pub mod config;
pub mod http;
pub mod logging;
pub mod settings;
pub mod store;

// Re-export commonly used types
pub use auth::RestIdentityProvider;
pub use config::{ConfigLoader, FileConfig};
pub use http::{HttpCompilerGateway, HttpGeneratorGateway, build_client};
pub use logging::JsonlTranscriptLogger;
pub use settings::FileSettingsCache;
pub use store::{RestAccountStore, RestHistoryStore};
