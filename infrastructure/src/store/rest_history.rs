//! REST adapter for the per-user history sub-collection
//!
//! Entries live under `{base}/api/users/{uid}/documents`, listed newest
//! first with a `limit` query. Deleting an id that is already gone is a
//! success (the store returns 404, the contract says idempotent).

use crate::store::store_error;
use async_trait::async_trait;
use pdraft_application::{HistoryStore, PersistenceError};
use pdraft_domain::{HistoryDraft, HistoryEntry};
use serde::Deserialize;
use tracing::debug;

#[derive(Deserialize)]
struct AppendResponse {
    id: String,
}

/// History store adapter over `{base}/api/users/{uid}/documents`.
pub struct RestHistoryStore {
    client: reqwest::Client,
    base_url: String,
}

impl RestHistoryStore {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn collection_url(&self, uid: &str) -> String {
        format!("{}/api/users/{}/documents", self.base_url, uid)
    }
}

#[async_trait]
impl HistoryStore for RestHistoryStore {
    async fn list(&self, uid: &str, limit: usize) -> Result<Vec<HistoryEntry>, PersistenceError> {
        let response = self
            .client
            .get(self.collection_url(uid))
            .query(&[("limit", limit)])
            .send()
            .await
            .map_err(|e| PersistenceError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(store_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| PersistenceError::Serialization(e.to_string()))
    }

    async fn append(&self, uid: &str, draft: &HistoryDraft) -> Result<String, PersistenceError> {
        let response = self
            .client
            .post(self.collection_url(uid))
            .json(draft)
            .send()
            .await
            .map_err(|e| PersistenceError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(store_error(response).await);
        }

        let body: AppendResponse = response
            .json()
            .await
            .map_err(|e| PersistenceError::Serialization(e.to_string()))?;
        debug!("Appended history entry {} for {}", body.id, uid);
        Ok(body.id)
    }

    async fn remove(&self, uid: &str, id: &str) -> Result<(), PersistenceError> {
        let url = format!("{}/{}", self.collection_url(uid), id);
        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(|e| PersistenceError::RequestFailed(e.to_string()))?;

        // Idempotent: already deleted counts as deleted
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(());
        }
        if !response.status().is_success() {
            return Err(store_error(response).await);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_entry_wire_format() {
        let entry: HistoryEntry = serde_json::from_str(
            r#"{
                "id": "h-1",
                "title": "Report",
                "description": "Quarterly results",
                "latex": "\\documentclass{article}",
                "pdfUrl": "http://localhost:5000/api/download-pdf/a.pdf",
                "createdAt": "2025-06-01T12:00:00Z",
                "messages": [
                    {"role": "user", "text": "**Title:** Report"},
                    {"role": "assistant", "text": "PDF generated successfully!",
                     "pdf_url": "http://localhost:5000/api/download-pdf/a.pdf"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(entry.id, "h-1");
        assert_eq!(entry.messages.len(), 2);
    }
}
