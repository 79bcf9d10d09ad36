//! Local settings persistence

pub mod file_cache;

pub use file_cache::FileSettingsCache;
