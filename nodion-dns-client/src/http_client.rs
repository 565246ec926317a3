//! Generic HTTP client tools
//!
//! Sends a prepared `RequestBuilder`, logs the exchange, and turns the reply
//! into either a body string or a [`ClientError`]. Every call is a single
//! request; nothing here retries.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::{ApiError, ClientError, Result};
use crate::utils::log_sanitizer::truncate_for_log;

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns the status and response text.
    ///
    /// # Arguments
    /// * `request_builder` - configured request (URL, headers, body)
    /// * `method_name` - request method name, used for logs
    /// * `url` - request URL, used for logs
    ///
    /// # Returns
    /// * `Ok((status_code, response_text))` for any HTTP status
    /// * `Err(ClientError::Timeout)` - the configured timeout elapsed
    /// * `Err(ClientError::NetworkError)` - connection or body read failure
    pub async fn execute_request(
        request_builder: RequestBuilder,
        method_name: &str,
        url: &str,
    ) -> Result<(u16, String)> {
        log::debug!("{method_name} {url}");

        let response = request_builder.send().await.map_err(transport_error)?;

        let status_code = response.status().as_u16();
        log::debug!("Response Status: {status_code}");

        let response_text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                transport_error(e)
            } else {
                ClientError::NetworkError {
                    detail: format!("Failed to read response body: {e}"),
                }
            }
        })?;

        log::debug!("Response Body: {}", truncate_for_log(&response_text));

        Ok((status_code, response_text))
    }

    /// Fails with [`ClientError::Api`] unless `status_code` is 2xx.
    pub fn ensure_success(status_code: u16, response_text: &str) -> Result<()> {
        if (200..300).contains(&status_code) {
            return Ok(());
        }
        Err(ClientError::Api(ApiError::from_response(
            status_code,
            response_text,
        )))
    }

    /// Parse JSON response
    ///
    /// # Returns
    /// * `Ok(T)` - successfully parsed
    /// * `Err(ClientError::ParseError)` - parsing failed
    pub fn parse_json<T>(response_text: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("JSON parse failed: {e}");
            log::error!("Raw response: {}", truncate_for_log(response_text));
            ClientError::ParseError {
                detail: e.to_string(),
            }
        })
    }
}

fn transport_error(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Timeout {
            detail: e.to_string(),
        }
    } else {
        ClientError::NetworkError {
            detail: e.to_string(),
        }
    }
}
