/// HTTP client for the HCP Vault Secrets "open app secrets" endpoint.
use async_trait::async_trait;
use serde::Deserialize;
use url::Url;
use zeroize::Zeroizing;

use crate::config::Config;
use crate::errors::LoadError;

pub struct HcpClient {
    client: reqwest::Client,
    url: Url,
    api_key: Zeroizing<String>,
}

impl HcpClient {
    pub fn new(cfg: &Config) -> Result<Self, LoadError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(cfg.timeout)
            .user_agent(concat!("secrets-bootstrap/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(LoadError::Client)?;

        Ok(Self {
            client,
            url: cfg.open_url(),
            api_key: cfg.api_key.clone().unwrap_or_default(),
        })
    }
}

#[async_trait]
impl super::SecretSource for HcpClient {
    async fn open_first(&self) -> Result<String, LoadError> {
        tracing::debug!(url = %self.url, "opening app secrets");

        let resp = self
            .client
            .get(self.url.clone())
            .bearer_auth(self.api_key.as_str())
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(LoadError::Status(status));
        }

        let body = resp.bytes().await?;
        let data: serde_json::Value = serde_json::from_slice(&body)?;
        first_secret_value(data).ok_or(LoadError::InvalidResponse)
    }
}

#[derive(Deserialize)]
struct AppSecret {
    version: Option<SecretVersion>,
}

#[derive(Deserialize)]
struct SecretVersion {
    value: Option<String>,
}

/// Pull `secrets[0].version.value` out of an open response.
///
/// Returns `None` when `secrets` is missing or not an array, when the array
/// is empty, or when the first entry has no non-empty string value.
fn first_secret_value(data: serde_json::Value) -> Option<String> {
    let first = data.get("secrets")?.as_array()?.first()?.clone();
    let secret: AppSecret = serde_json::from_value(first).ok()?;
    secret
        .version?
        .value
        .filter(|value| !value.is_empty())
}
