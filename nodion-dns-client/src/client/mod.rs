//! Nodion DNS API client

mod api;
mod http;

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::config::{ClientConfig, create_http_client};
use crate::error::{ClientError, Result};
use crate::utils::log_sanitizer::mask_secret;

/// Nodion DNS API client.
///
/// Holds the HTTP transport, the API key and the parsed base URL. It keeps no
/// other state, so one instance (or a clone, which shares the connection pool)
/// can serve any number of concurrent tasks.
#[derive(Clone)]
pub struct NodionClient {
    pub(crate) client: Client,
    pub(crate) api_key: String,
    pub(crate) base_url: Url,
}

impl std::fmt::Debug for NodionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodionClient")
            .field("api_key", &mask_secret(&self.api_key))
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl NodionClient {
    /// Client for the production endpoint with default timeouts.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder(api_key).build()
    }

    pub fn builder(api_key: impl Into<String>) -> NodionClientBuilder {
        NodionClientBuilder {
            config: ClientConfig::new(api_key),
            http_client: None,
        }
    }

    pub fn from_config(config: ClientConfig) -> Result<Self> {
        NodionClientBuilder {
            config,
            http_client: None,
        }
        .build()
    }

    /// Builds a client from `NODION_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_config(ClientConfig::from_env()?)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL + percent-encoded path segments + optional query string.
    pub(crate) fn endpoint(&self, segments: &[&str], query: &[(&str, String)]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|()| {
                ClientError::invalid_parameter("base_url", "cannot be used as a base")
            })?;
            path.pop_if_empty();
            path.extend(segments);
        }

        if !query.is_empty() {
            let query_string = query
                .iter()
                .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
                .collect::<Vec<_>>()
                .join("&");
            url.set_query(Some(&query_string));
        }

        Ok(url)
    }
}

/// Rejects identifiers that would change the shape of the request path.
pub(crate) fn check_id(param: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ClientError::invalid_parameter(param, "must not be empty"));
    }
    if matches!(value, "." | "..") {
        return Err(ClientError::invalid_parameter(
            param,
            format!("'{value}' is not a valid identifier"),
        ));
    }
    Ok(())
}

/// Builder for [`NodionClient`].
///
/// Timeouts only apply to the internally created transport. When a client is
/// supplied with [`with_http_client`](Self::with_http_client) its own settings win.
#[derive(Debug)]
pub struct NodionClientBuilder {
    config: ClientConfig,
    http_client: Option<Client>,
}

impl NodionClientBuilder {
    /// Overrides the API root, e.g. to point at a mock server.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    #[must_use]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Uses the given transport instead of creating one.
    #[must_use]
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn build(self) -> Result<NodionClient> {
        self.config.validate()?;
        let base_url = self.config.parsed_base_url()?;
        let client = match self.http_client {
            Some(client) => client,
            None => create_http_client(&self.config)?,
        };

        log::debug!(
            "Nodion client ready: base_url={base_url}, api_key={}",
            mask_secret(&self.config.api_key)
        );

        Ok(NodionClient {
            client,
            api_key: self.config.api_key,
            base_url,
        })
    }
}
