//! HTTP adapters for the generation and compilation endpoints

pub mod compiler;
pub mod generator;

pub use compiler::HttpCompilerGateway;
pub use generator::HttpGeneratorGateway;

use pdraft_application::RemoteError;
use serde::Deserialize;
use std::time::Duration;

/// Build the shared HTTP client with the configured request timeout.
pub fn build_client(timeout_secs: u64) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Turn a non-2xx response into a [`RemoteError`], preferring the
/// server-reported `error` field over the raw body.
pub(crate) async fn status_error(response: reqwest::Response) -> RemoteError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.error)
        .unwrap_or(body);
    let message = if message.trim().is_empty() {
        status.canonical_reason().unwrap_or("Unknown").to_string()
    } else {
        message.trim().to_string()
    };
    RemoteError::Status {
        status: status.as_u16(),
        message,
    }
}
