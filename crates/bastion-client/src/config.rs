//! Governance API client configuration.
//!
//! Points at the upstream governance service. Defaults target a local stub
//! server; override via environment variables or explicit construction.

use url::Url;
use zeroize::Zeroizing;

/// Default base URL of the governance API.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080/api";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for connecting to the governance API.
///
/// Custom `Debug` implementation redacts the `api_token` field.
#[derive(Clone)]
pub struct GovernanceApiConfig {
    /// Base URL; endpoint paths are appended to it.
    pub base_url: Url,
    /// Bearer token. `None` sends unauthenticated requests.
    pub api_token: Option<Zeroizing<String>>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for GovernanceApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GovernanceApiConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl GovernanceApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `BASTION_API_URL` (default: `http://127.0.0.1:8080/api`)
    /// - `BASTION_API_TOKEN` (optional)
    /// - `BASTION_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_token = std::env::var("BASTION_API_TOKEN")
            .ok()
            .filter(|t| !t.is_empty())
            .map(Zeroizing::new);

        Ok(Self {
            base_url: env_url("BASTION_API_URL", DEFAULT_API_URL)?,
            api_token,
            timeout_secs: std::env::var("BASTION_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|&secs| secs > 0)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Configuration for an explicit base URL, without a token.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if `base_url` does not parse.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_url("base_url", base_url)?,
            api_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Configuration pointing at a stub server on localhost (for testing).
    pub fn local(port: u16) -> Result<Self, ConfigError> {
        let mut cfg = Self::new(&format!("http://127.0.0.1:{port}/api"))?;
        cfg.timeout_secs = 5;
        Ok(cfg)
    }

    /// Point at another base URL, keeping the token and timeout.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_url("base_url", base_url)?;
        Ok(self)
    }

    /// Set the request timeout. Zero keeps the current value.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        if secs > 0 {
            self.timeout_secs = secs;
        }
        self
    }

    /// Set the bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(Zeroizing::new(token.into()));
        self
    }
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    parse_url(var, &raw)
}

fn parse_url(what: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(what.to_string(), e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl(
            what.to_string(),
            "URL cannot be used as a base".to_string(),
        ));
    }
    Ok(url)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("token contains characters not allowed in an HTTP header")]
    InvalidToken,
}
