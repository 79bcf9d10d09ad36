//! REST adapter for the identity provider
//!
//! Email/password sign-in and sign-up against the configured auth
//! endpoint. The provider reports a stable uid and whether the account
//! was newly created.

use async_trait::async_trait;
use pdraft_application::{AuthError, IdentityProvider, ProviderUser};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Serialize)]
struct CredentialsRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponse {
    uid: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    is_new_user: bool,
}

#[derive(Deserialize)]
struct AuthErrorBody {
    error: Option<String>,
}

/// Identity provider adapter over `POST {base}/api/auth/sign-in` and
/// `POST {base}/api/auth/sign-up`.
pub struct RestIdentityProvider {
    client: reqwest::Client,
    base_url: String,
}

impl RestIdentityProvider {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn request(
        &self,
        path: &str,
        email: &str,
        password: &str,
    ) -> Result<ProviderUser, AuthError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Authenticating against {}", path);

        let response = self
            .client
            .post(&url)
            .json(&CredentialsRequest { email, password })
            .send()
            .await
            .map_err(|e| AuthError::ConnectionError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<AuthErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| {
                    status.canonical_reason().unwrap_or("Unknown").to_string()
                });
            return Err(AuthError::ProviderRejected(message));
        }

        let body: AuthResponse = response
            .json()
            .await
            .map_err(|e| AuthError::ConnectionError(e.to_string()))?;

        Ok(ProviderUser {
            uid: body.uid,
            email: email.to_string(),
            display_name: body.display_name,
            is_new: body.is_new_user,
        })
    }
}

#[async_trait]
impl IdentityProvider for RestIdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderUser, AuthError> {
        self.request("/api/auth/sign-in", email, password).await
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<ProviderUser, AuthError> {
        self.request("/api/auth/sign-up", email, password).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_response_defaults() {
        let body: AuthResponse = serde_json::from_str(r#"{"uid": "u-1"}"#).unwrap();
        assert_eq!(body.uid, "u-1");
        assert!(body.display_name.is_none());
        assert!(!body.is_new_user);
    }

    #[test]
    fn test_auth_response_full() {
        let body: AuthResponse = serde_json::from_str(
            r#"{"uid": "u-2", "displayName": "Ada", "isNewUser": true}"#,
        )
        .unwrap();
        assert_eq!(body.display_name.as_deref(), Some("Ada"));
        assert!(body.is_new_user);
    }
}
