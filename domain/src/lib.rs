//! Domain layer for pdraft
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Session
//!
//! A session binds an identity (authenticated account or local guest) to a
//! credit balance. Credits are consumed per generated document, estimated
//! from the input size, and the balance clamps at zero.
//!
//! ## Generation
//!
//! Document generation is a linear pipeline: validate the request, turn it
//! into a LaTeX prompt, compile the returned LaTeX into a PDF, record the
//! result in history, debit the session. The phases live here as a pure
//! state model; all I/O happens behind application-layer ports.

pub mod core;
pub mod generation;
pub mod history;
pub mod prompt;
pub mod session;
pub mod settings;

// Re-export commonly used types
pub use crate::core::error::ValidationError;
pub use generation::{
    cost::{MIN_CREDITS, estimate_cost},
    phase::GenerationPhase,
    request::DocumentRequest,
};
pub use history::{HISTORY_LIMIT, HistoryDraft, HistoryEntry, HistoryView};
pub use prompt::latex_prompt;
pub use session::{
    entities::{GUEST_CREDITS, NEW_ACCOUNT_CREDITS, Session},
    identity::Identity,
    transcript::{Message, Role, Transcript},
};
pub use settings::{Settings, SettingsPatch};
