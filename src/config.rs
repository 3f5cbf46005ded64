use std::fmt;
use std::time::Duration;

use url::Url;
use zeroize::Zeroizing;

pub const DEFAULT_API_BASE: &str = "https://api.cloud.hashicorp.com";
pub const DEFAULT_APP_NAME: &str = "Demo";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// API version segment of the Vault Secrets "open app" route.
const SECRETS_API_VERSION: &str = "2023-06-13";

pub struct Config {
    /// HCP organization ID. `None` means secrets are not configured.
    pub org: Option<String>,
    pub project: Option<String>,
    /// Bearer token sent on the open request.
    pub api_key: Option<Zeroizing<String>>,
    /// Vault Secrets app to open. Also prefixes every placeholder.
    /// Set via HCP_APP_NAME env var. Default: "Demo".
    pub app_name: String,
    /// Set via HCP_API_BASE env var. Default: https://api.cloud.hashicorp.com
    pub api_base: Url,
    /// Whole-request timeout for the open call.
    /// Set via HCP_TIMEOUT_SECS env var. Default: 10.
    pub timeout: Duration,
}

impl Config {
    /// Build a config from an arbitrary key lookup.
    /// Empty values are treated the same as missing ones.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let api_base = match get("HCP_API_BASE") {
            Some(raw) => Url::parse(&raw).unwrap_or_else(|e| {
                tracing::warn!(value = %raw, error = %e, "invalid HCP_API_BASE, using default");
                default_api_base()
            }),
            None => default_api_base(),
        };

        let timeout_secs = match get("HCP_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "invalid HCP_TIMEOUT_SECS, using default");
                DEFAULT_TIMEOUT_SECS
            }),
            None => DEFAULT_TIMEOUT_SECS,
        };

        Self {
            org: get("HCP_ORG"),
            project: get("HCP_PROJECT"),
            api_key: get("HCP_API_KEY").map(Zeroizing::new),
            app_name: get("HCP_APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            api_base,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// True when an organization is set; the open request is only made then.
    pub fn is_configured(&self) -> bool {
        self.org.is_some()
    }

    /// Build the "open app secrets" endpoint.
    ///
    /// Each identifier is percent-encoded as a single path segment, so a
    /// stray `/` in an env var cannot reshape the route. A missing project
    /// leaves an empty segment and the API rejects the request.
    pub fn open_url(&self) -> Url {
        let mut url = self.api_base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend([
                "secrets",
                SECRETS_API_VERSION,
                "organizations",
                self.org.as_deref().unwrap_or_default(),
                "projects",
                self.project.as_deref().unwrap_or_default(),
                "apps",
                self.app_name.as_str(),
                "open",
            ]);
        }
        url
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("org", &self.org)
            .field("project", &self.project)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("app_name", &self.app_name)
            .field("api_base", &self.api_base.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn default_api_base() -> Url {
    Url::parse(DEFAULT_API_BASE).expect("default API base is a valid URL")
}

/// Load configuration from the process environment (and `.env`, if present).
pub fn load() -> Config {
    dotenvy::dotenv().ok();
    from_env()
}

/// Read configuration from the process environment only.
pub fn from_env() -> Config {
    Config::from_lookup(|key| std::env::var(key).ok())
}
