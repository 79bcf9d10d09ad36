//! Identity provider port
//!
//! Defines the interface for email/password authentication. The provider
//! returns a stable user identifier and whether the account was newly
//! created, so the caller can initialize a fresh account profile.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during authentication.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Detected locally before any remote call.
    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Authentication rejected: {0}")]
    ProviderRejected(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The provider accepted the credentials but the account profile
    /// could not be loaded or initialized.
    #[error("Failed to load account profile: {0}")]
    ProfileUnavailable(String),
}

/// A user as reported by the identity provider.
#[derive(Debug, Clone)]
pub struct ProviderUser {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
    /// True when this sign-in/sign-up created the account.
    pub is_new: bool,
}

/// Port for the external identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderUser, AuthError>;

    async fn sign_up(&self, email: &str, password: &str) -> Result<ProviderUser, AuthError>;
}
