//! Shared persistence error type for store ports

use thiserror::Error;

/// Errors from the account/history stores and the local settings cache.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Store request failed: {0}")]
    RequestFailed(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(String),
}
