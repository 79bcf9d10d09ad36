//! HTTP adapter for the compilation endpoint

use crate::http::status_error;
use async_trait::async_trait;
use pdraft_application::{CompilerGateway, RemoteError};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CompilePdfRequest<'a> {
    latex: &'a str,
    title: &'a str,
    user_id: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompilePdfResponse {
    pdf_url: String,
}

/// Gateway adapter for `POST {base}/api/compile-pdf`.
///
/// The endpoint may return a relative artifact reference
/// (e.g. `/api/download-pdf/<id>.pdf`); it is resolved against the
/// configured base before being handed back.
pub struct HttpCompilerGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCompilerGateway {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl CompilerGateway for HttpCompilerGateway {
    async fn compile_pdf(
        &self,
        latex: &str,
        title: &str,
        uid: &str,
    ) -> Result<String, RemoteError> {
        let url = format!("{}/api/compile-pdf", self.base_url);
        debug!("Requesting PDF compilation for {}", uid);

        let response = self
            .client
            .post(&url)
            .json(&CompilePdfRequest {
                latex,
                title,
                user_id: uid,
            })
            .send()
            .await
            .map_err(|e| RemoteError::ConnectionError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let body: CompilePdfResponse = response
            .json()
            .await
            .map_err(|e| RemoteError::InvalidResponse(e.to_string()))?;
        Ok(resolve_pdf_url(&self.base_url, &body.pdf_url))
    }
}

/// Resolve a possibly-relative artifact reference against the API base.
fn resolve_pdf_url(base_url: &str, pdf_url: &str) -> String {
    if pdf_url.starts_with("http") {
        pdf_url.to_string()
    } else {
        format!("{}{}", base_url.trim_end_matches('/'), pdf_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_url_resolved_against_base() {
        assert_eq!(
            resolve_pdf_url("http://localhost:5000", "/api/download-pdf/a.pdf"),
            "http://localhost:5000/api/download-pdf/a.pdf"
        );
    }

    #[test]
    fn test_absolute_url_passed_through() {
        assert_eq!(
            resolve_pdf_url("http://localhost:5000", "https://cdn.example.com/a.pdf"),
            "https://cdn.example.com/a.pdf"
        );
    }

    #[test]
    fn test_trailing_slash_on_base() {
        assert_eq!(
            resolve_pdf_url("http://localhost:5000/", "/api/download-pdf/a.pdf"),
            "http://localhost:5000/api/download-pdf/a.pdf"
        );
    }
}
