use std::env;
use std::time::Duration;

use fz_core::{Error, Result};
use url::Url;

pub const BASE_URL: &str = "http://api.feedzilla.com/v1/";
pub const DEFAULT_CLIENT_SOURCE: &str = "fz-client";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const ENV_BASE_URL: &str = "FEEDZILLA_BASE_URL";
pub const ENV_TIMEOUT_MS: &str = "FEEDZILLA_TIMEOUT_MS";
pub const ENV_CLIENT_SOURCE: &str = "FEEDZILLA_CLIENT_SOURCE";

/// Connection settings shared by every request an `ApiClient` makes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: Url,
    /// Applied to both connection establishment and response read. Zero disables it.
    pub timeout: Duration,
    /// Sent as `clientSource` on article queries.
    pub client_source: String,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(BASE_URL).expect("BASE_URL is a valid URL"),
            timeout: DEFAULT_TIMEOUT,
            client_source: DEFAULT_CLIENT_SOURCE.to_string(),
            user_agent: format!("fz_client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `FEEDZILLA_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(url) = env::var(ENV_BASE_URL) {
            config = config.with_base_url(&url)?;
        }
        if let Ok(timeout) = env::var(ENV_TIMEOUT_MS) {
            let millis = timeout.trim().parse::<u64>().map_err(|e| {
                Error::Validation(format!("{} must be milliseconds: {}", ENV_TIMEOUT_MS, e))
            })?;
            config = config.with_timeout_ms(millis);
        }
        if let Ok(source) = env::var(ENV_CLIENT_SOURCE) {
            config = config.with_client_source(source);
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, url: &str) -> Result<Self> {
        self.base_url = parse_base_url(url)?;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_timeout_ms(self, millis: u64) -> Self {
        self.with_timeout(Duration::from_millis(millis))
    }

    pub fn with_client_source(mut self, source: impl Into<String>) -> Self {
        self.client_source = source.into();
        self
    }

    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    pub fn host(&self) -> Option<&str> {
        self.base_url.host_str()
    }
}

/// Parses an http(s) base URL, forcing a trailing `/` so relative paths join under it.
pub fn parse_base_url(url: &str) -> Result<Url> {
    let mut parsed = Url::parse(url.trim())?;
    if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::InvalidUrl(format!("{} is not an http(s) base URL", url)));
    }
    if parsed.host_str().is_none() {
        return Err(Error::InvalidUrl(format!("{} has no host", url)));
    }
    if !parsed.path().ends_with('/') {
        let path = format!("{}/", parsed.path());
        parsed.set_path(&path);
    }
    Ok(parsed)
}
