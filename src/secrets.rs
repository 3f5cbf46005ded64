//! Process-wide secret populated once at startup.
//!
//! [`register`] is the startup hook: it reads HCP settings from the
//! environment, opens the configured Vault Secrets app and stores the first
//! secret value. Every failure is recorded as a placeholder string instead,
//! so the hook never returns an error and never retries.

use std::fmt;

use tokio::sync::OnceCell;

use crate::config::{self, Config};
use crate::errors::LoadError;
use crate::vault::hcp::HcpClient;
use crate::vault::SecretSource;

static SECRETS: OnceCell<Secrets> = OnceCell::const_new();

/// The stored secret, or the placeholder that stands in for it.
#[derive(Clone, PartialEq, Eq)]
pub enum SecretValue {
    Loaded(String),
    Placeholder(String),
}

impl SecretValue {
    pub fn as_str(&self) -> &str {
        match self {
            SecretValue::Loaded(v) | SecretValue::Placeholder(v) => v,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, SecretValue::Loaded(_))
    }
}

impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecretValue::Loaded(_) => f.write_str("Loaded(<redacted>)"),
            SecretValue::Placeholder(msg) => f.debug_tuple("Placeholder").field(msg).finish(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Secrets {
    pub api_key: SecretValue,
}

/// Startup hook: load config from the environment and populate the global.
pub async fn register() -> &'static Secrets {
    let cfg = config::load();
    register_with(&cfg).await
}

/// Populate the global from `cfg`. Only the first call does any work;
/// later calls return the record stored by the first.
pub async fn register_with(cfg: &Config) -> &'static Secrets {
    SECRETS
        .get_or_init(|| async {
            Secrets {
                api_key: resolve(cfg).await,
            }
        })
        .await
}

/// The registered secrets, if the hook has run.
pub fn secrets() -> Option<&'static Secrets> {
    SECRETS.get()
}

/// The registered API key (or its placeholder), if the hook has run.
pub fn api_key() -> Option<&'static str> {
    SECRETS.get().map(|s| s.api_key.as_str())
}

/// Resolve the secret for `cfg` without touching the global.
pub async fn resolve(cfg: &Config) -> SecretValue {
    if !cfg.is_configured() {
        tracing::warn!(app = %cfg.app_name, "HCP_ORG is not set, secrets not loaded");
        return SecretValue::Placeholder(LoadError::NotConfigured.placeholder(&cfg.app_name));
    }

    match HcpClient::new(cfg) {
        Ok(client) => resolve_from(&client, &cfg.app_name).await,
        Err(e) => fallback(e, &cfg.app_name),
    }
}

/// Resolve the secret from any source, mapping failures to placeholders.
pub async fn resolve_from(source: &dyn SecretSource, app: &str) -> SecretValue {
    match source.open_first().await {
        Ok(value) => {
            tracing::info!(app, "Secrets loaded!");
            SecretValue::Loaded(value)
        }
        Err(e) => fallback(e, app),
    }
}

fn fallback(err: LoadError, app: &str) -> SecretValue {
    tracing::warn!(app, error = %err, "failed to load secrets, using placeholder");
    SecretValue::Placeholder(err.placeholder(app))
}
