//! Domain error types

use thiserror::Error;

/// User-correctable validation failures.
///
/// These are detected before any remote call is made; the pipeline never
/// spends credits or network round-trips on an invalid request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title must not be empty")]
    EmptyTitle,

    #[error("Description must not be empty")]
    EmptyDescription,

    #[error("Insufficient credits: {available} available, {required} required")]
    InsufficientCredits { available: u64, required: u64 },
}
