//! Nodion HTTP 请求方法

use reqwest::RequestBuilder;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{ClientError, Result};
use crate::http_client::HttpUtils;
use crate::types::DeleteResponse;
use crate::utils::log_sanitizer::truncate_for_log;

use super::NodionClient;

impl NodionClient {
    /// 执行 GET 请求
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let request = self.client.get(url.clone());
        let body = self.send(request, "GET", &url).await?;
        HttpUtils::parse_json(&body)
    }

    /// 执行 POST 请求（JSON 请求体）
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T> {
        let body_json =
            serde_json::to_string(body).map_err(|e| ClientError::SerializationError {
                detail: e.to_string(),
            })?;
        log::debug!("Request Body: {}", truncate_for_log(&body_json));

        let request = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body_json);
        let response = self.send(request, "POST", &url).await?;
        HttpUtils::parse_json(&response)
    }

    /// 执行 DELETE 请求，返回服务端报告的 `deleted` 标志
    ///
    /// An empty 2xx body (e.g. 204) counts as deleted. A JSON body without a
    /// `deleted` field, such as `{}`, reads as `false`.
    pub(crate) async fn delete(&self, url: Url) -> Result<bool> {
        let request = self.client.delete(url.clone());
        let body = self.send(request, "DELETE", &url).await?;
        if body.trim().is_empty() {
            return Ok(true);
        }
        let resp: DeleteResponse = HttpUtils::parse_json(&body)?;
        Ok(resp.deleted)
    }

    /// Attaches auth, sends the request and returns the body of a 2xx response.
    async fn send(&self, request: RequestBuilder, method: &str, url: &Url) -> Result<String> {
        let request = request
            .bearer_auth(&self.api_key)
            .header(ACCEPT, "application/json");

        let result = match HttpUtils::execute_request(request, method, url.as_str()).await {
            Ok((status, body)) => HttpUtils::ensure_success(status, &body).map(|()| body),
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            if e.is_expected() {
                log::warn!("{method} {url} failed: {e}");
            } else {
                log::error!("{method} {url} failed: {e}");
            }
        }

        result
    }
}
