//! Application layer for pdraft
//!
//! This crate contains use cases and port definitions. It depends only on
//! the domain layer; adapters for the ports live in the infrastructure
//! layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    account_store::{AccountRecord, AccountStore},
    compiler_gateway::CompilerGateway,
    generator_gateway::GeneratorGateway,
    identity_provider::{AuthError, IdentityProvider, ProviderUser},
    notifier::{
        GenerationProgress, NoGenerationProgress, NoSessionNotifier, SessionNotifier,
    },
    persistence::PersistenceError,
    remote::RemoteError,
    settings_cache::SettingsCache,
    transcript_logger::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger},
};
pub use ports::history_store::HistoryStore;
pub use use_cases::account_access::{AccountAccess, AppendOutcome};
pub use use_cases::generate_document::{
    GenerateDocumentUseCase, GenerateError, GenerateInput, GenerateOutput,
};
pub use use_cases::history_service::HistoryService;
pub use use_cases::session_manager::{SessionContext, SessionManager};
pub use use_cases::settings_service::SettingsService;
