use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can stop the startup hook from producing a real secret.
///
/// None of these reach the caller of `register`: each one is turned into a
/// placeholder string via [`LoadError::placeholder`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("secrets not configured")]
    NotConfigured,

    #[error("secrets API returned {0}")]
    Status(StatusCode),

    #[error("invalid secrets response")]
    InvalidResponse,

    #[error("failed to build HTTP client: {0}")]
    Client(reqwest::Error),

    #[error("{0}")]
    Request(#[from] reqwest::Error),

    #[error("{0}")]
    Decode(#[from] serde_json::Error),
}

impl LoadError {
    /// The value stored in place of the secret when loading fails.
    pub fn placeholder(&self, app: &str) -> String {
        match self {
            LoadError::NotConfigured => format!("{}: You have not loaded your secrets", app),
            LoadError::Status(status) => {
                format!("{}: Failed to fetch secrets ({})", app, status.as_u16())
            }
            LoadError::InvalidResponse => format!("{}: Invalid secrets response", app),
            LoadError::Client(_) | LoadError::Request(_) | LoadError::Decode(_) => {
                format!("{}: Error loading secrets: {}", app, self)
            }
        }
    }
}
