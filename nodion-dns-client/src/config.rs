//! Client configuration and HTTP client construction.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::HeaderValue;
use url::Url;

use crate::error::{ClientError, Result};
use crate::utils::log_sanitizer::mask_secret;

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.nodion.com/v1/";

/// API key environment variable (required by [`ClientConfig::from_env`]).
pub const ENV_API_KEY: &str = "NODION_API_KEY";
/// Base URL override environment variable.
pub const ENV_BASE_URL: &str = "NODION_BASE_URL";
/// Request timeout environment variable, in seconds.
pub const ENV_HTTP_TIMEOUT: &str = "NODION_HTTP_TIMEOUT";

/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Settings used to build a [`NodionClient`](crate::NodionClient).
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Bearer token sent on every request.
    pub api_key: String,
    /// API root; paths such as `dns_zones` are appended to it.
    pub base_url: String,
    /// TCP/TLS connect timeout.
    pub connect_timeout: Duration,
    /// Whole-request timeout.
    pub request_timeout: Duration,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &mask_secret(&self.api_key))
            .field("base_url", &self.base_url)
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl ClientConfig {
    /// Default settings for the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Reads `NODION_API_KEY`, `NODION_BASE_URL` and `NODION_HTTP_TIMEOUT`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup(ENV_API_KEY)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                ClientError::invalid_parameter(ENV_API_KEY, "environment variable is not set")
            })?;

        let mut config = Self::new(api_key.trim());

        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            config.base_url = base_url.trim().to_string();
        }

        if let Some(raw) = lookup(ENV_HTTP_TIMEOUT).filter(|v| !v.trim().is_empty()) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ClientError::invalid_parameter(
                    ENV_HTTP_TIMEOUT,
                    format!("expected a number of seconds, got '{raw}'"),
                )
            })?;
            if secs == 0 {
                return Err(ClientError::invalid_parameter(
                    ENV_HTTP_TIMEOUT,
                    "timeout must be at least one second",
                ));
            }
            config.request_timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks the API key, the timeouts and the base URL.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(ClientError::invalid_parameter(
                "api_key",
                "credentials missing",
            ));
        }
        // must fit in an `Authorization: Bearer ..` header
        if HeaderValue::from_str(&format!("Bearer {}", self.api_key)).is_err() {
            return Err(ClientError::invalid_parameter(
                "api_key",
                "contains characters not allowed in an HTTP header",
            ));
        }
        if self.connect_timeout.is_zero() {
            return Err(ClientError::invalid_parameter(
                "connect_timeout",
                "must be greater than zero",
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(ClientError::invalid_parameter(
                "request_timeout",
                "must be greater than zero",
            ));
        }
        self.parsed_base_url().map(|_| ())
    }

    /// Parses `base_url`. Only absolute `http`/`https` URLs are accepted.
    pub(crate) fn parsed_base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::invalid_parameter("base_url", e.to_string()))?;

        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(ClientError::invalid_parameter(
                "base_url",
                format!("unsupported URL '{}'", self.base_url),
            ));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(ClientError::invalid_parameter(
                "base_url",
                "must not contain a query or fragment",
            ));
        }
        Ok(url)
    }
}

/// 创建带超时配置的 HTTP Client
pub(crate) fn create_http_client(config: &ClientConfig) -> Result<Client> {
    Client::builder()
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout)
        .build()
        .map_err(|e| ClientError::NetworkError {
            detail: format!("Failed to create HTTP client: {e}"),
        })
}
