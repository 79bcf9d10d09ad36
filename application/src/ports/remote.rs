//! Shared error type for the generation and compilation gateways

use thiserror::Error;

/// Errors from the remote generation/compilation endpoints.
///
/// Any non-2xx response or network failure is terminal for the current
/// pipeline run; there are no automatic retries.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
