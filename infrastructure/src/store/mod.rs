//! Remote document store adapters

pub mod rest_account;
pub mod rest_history;

pub use rest_account::RestAccountStore;
pub use rest_history::RestHistoryStore;

use pdraft_application::PersistenceError;

/// Turn a non-2xx store response into a [`PersistenceError`].
pub(crate) async fn store_error(response: reqwest::Response) -> PersistenceError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = if body.trim().is_empty() {
        status.canonical_reason().unwrap_or("Unknown").to_string()
    } else {
        body.trim().to_string()
    };
    PersistenceError::RequestFailed(format!("{}: {}", status.as_u16(), message))
}
