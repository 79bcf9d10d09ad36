//! Markup-generation gateway port
//!
//! Turns a structured prompt into LaTeX source via the remote
//! generation endpoint.

use crate::ports::remote::RemoteError;
use async_trait::async_trait;

/// Gateway to the remote LaTeX generation endpoint.
#[async_trait]
pub trait GeneratorGateway: Send + Sync {
    /// Generate LaTeX source from a prompt. Returns the raw markup text.
    async fn generate_latex(
        &self,
        prompt: &str,
        max_tokens: u32,
        uid: &str,
    ) -> Result<String, RemoteError>;
}
