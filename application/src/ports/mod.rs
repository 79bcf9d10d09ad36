//! Port definitions
//!
//! Ports are the interfaces through which use cases reach the outside
//! world. Implementations (adapters) live in the infrastructure layer.

pub mod account_store;
pub mod compiler_gateway;
pub mod generator_gateway;
pub mod history_store;
pub mod identity_provider;
pub mod notifier;
pub mod persistence;
pub mod remote;
pub mod settings_cache;
pub mod transcript_logger;
