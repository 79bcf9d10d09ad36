//! HTTP adapter for the markup-generation endpoint

use crate::http::status_error;
use async_trait::async_trait;
use pdraft_application::{GeneratorGateway, RemoteError};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateLatexRequest<'a> {
    prompt: &'a str,
    max_tokens: u32,
    user_id: &'a str,
}

#[derive(Deserialize)]
struct GenerateLatexResponse {
    latex: String,
}

/// Gateway adapter for `POST {base}/api/generate-latex`.
pub struct HttpGeneratorGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGeneratorGateway {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl GeneratorGateway for HttpGeneratorGateway {
    async fn generate_latex(
        &self,
        prompt: &str,
        max_tokens: u32,
        uid: &str,
    ) -> Result<String, RemoteError> {
        let url = format!("{}/api/generate-latex", self.base_url);
        debug!("Requesting LaTeX generation for {}", uid);

        let response = self
            .client
            .post(&url)
            .json(&GenerateLatexRequest {
                prompt,
                max_tokens,
                user_id: uid,
            })
            .send()
            .await
            .map_err(|e| RemoteError::ConnectionError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let body: GenerateLatexResponse = response
            .json()
            .await
            .map_err(|e| RemoteError::InvalidResponse(e.to_string()))?;
        Ok(body.latex)
    }
}
