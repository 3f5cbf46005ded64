pub mod hcp;

use async_trait::async_trait;

use crate::errors::LoadError;

/// Abstraction over a remote secret store the startup hook can read from.
/// Implementations: HcpClient (HCP Vault Secrets "open app" API).
#[async_trait]
pub trait SecretSource: Send + Sync {
    /// Fetch the app's secrets and return the first value verbatim.
    /// One call, no retries.
    async fn open_first(&self) -> Result<String, LoadError>;
}
