//! Compilation gateway port

use crate::ports::remote::RemoteError;
use async_trait::async_trait;

/// Gateway to the remote LaTeX-to-PDF compilation endpoint.
#[async_trait]
pub trait CompilerGateway: Send + Sync {
    /// Compile LaTeX into a PDF and return an absolute URL to the
    /// produced artifact. Adapters resolve relative references against
    /// their configured base before returning.
    async fn compile_pdf(
        &self,
        latex: &str,
        title: &str,
        uid: &str,
    ) -> Result<String, RemoteError>;
}
