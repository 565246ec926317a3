use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Unified error type for all Nodion API operations.
///
/// Transport failures, undecodable responses and non-2xx replies each get their
/// own variant so callers can react without string matching. All variants are
/// serializable for structured error reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ClientError {
    /// A network-level error occurred (DNS resolution failure, connection refused,
    /// interrupted body, etc.).
    NetworkError {
        /// Error details.
        detail: String,
    },

    /// The HTTP request did not complete within the configured timeout.
    Timeout {
        /// Error details.
        detail: String,
    },

    /// The API answered with a non-2xx status.
    Api(ApiError),

    /// Failed to parse a successful API response.
    ParseError {
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    SerializationError {
        /// Details about the serialization failure.
        detail: String,
    },

    /// A caller-supplied value or configuration entry is unusable
    /// (empty identifier, malformed base URL, missing API key, ...).
    InvalidParameter {
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// No zone with the requested name exists on the account.
    ZoneNotFound {
        /// Zone name that was looked up.
        name: String,
    },
}

impl ClientError {
    /// 是否为预期行为（用户输入、资源不存在等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Api(api) => !matches!(api.kind(), ApiErrorKind::Server | ApiErrorKind::Other),
            Self::InvalidParameter { .. } | Self::ZoneNotFound { .. } => true,
            Self::NetworkError { .. }
            | Self::Timeout { .. }
            | Self::ParseError { .. }
            | Self::SerializationError { .. } => false,
        }
    }

    /// Returns the API error payload if the server rejected the request.
    #[must_use]
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(api) => Some(api),
            _ => None,
        }
    }

    /// HTTP status of the rejected request, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.as_api_error().map(|api| api.status)
    }

    pub(crate) fn invalid_parameter(param: &str, detail: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param: param.to_string(),
            detail: detail.into(),
        }
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { detail } => write!(f, "Network error: {detail}"),
            Self::Timeout { detail } => write!(f, "Request timeout: {detail}"),
            Self::Api(api) => write!(f, "API error: {api}"),
            Self::ParseError { detail } => write!(f, "Parse error: {detail}"),
            Self::SerializationError { detail } => write!(f, "Serialization error: {detail}"),
            Self::InvalidParameter { param, detail } => {
                write!(f, "Invalid parameter '{param}': {detail}")
            }
            Self::ZoneNotFound { name } => write!(f, "Zone '{name}' not found"),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<ApiError> for ClientError {
    fn from(api: ApiError) -> Self {
        Self::Api(api)
    }
}

/// Convenience type alias for `Result<T, ClientError>`.
pub type Result<T> = std::result::Result<T, ClientError>;

// ============ API Error ============

/// Coarse classification of an [`ApiError`] by HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 401: missing or wrong API key.
    Unauthorized,
    /// 403: the key lacks access to the resource.
    Forbidden,
    /// 404: zone or record does not exist.
    NotFound,
    /// 400 / 422: the request body was rejected.
    Validation,
    /// 429
    RateLimited,
    /// 5xx
    Server,
    /// Any other non-2xx status.
    Other,
}

/// Structured error returned by the API for non-2xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// HTTP status code of the response.
    pub status: u16,
    /// Human readable message.
    pub message: String,
    /// Field-level validation messages, keyed by field name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub details: BTreeMap<String, Vec<String>>,
}

/// Error body as sent by the API. Every field is optional because the shape
/// differs between endpoints and between validation and lookup failures.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    errors: Option<ErrorList>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorList {
    Messages(Vec<String>),
    Fields(BTreeMap<String, FieldMessages>),
    Single(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FieldMessages {
    Many(Vec<String>),
    One(String),
}

impl ApiError {
    /// Builds an error directly from a status and message.
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: BTreeMap::new(),
        }
    }

    /// Decodes a non-2xx response body.
    ///
    /// JSON bodies are read leniently (`errors` as a list, a field map or a
    /// string, then `error`, then `message`). A JSON body without any message
    /// uses the canonical reason phrase. Anything else falls back to the
    /// trimmed raw body, or the reason phrase when the body is empty.
    pub fn from_response(status: u16, body: &str) -> Self {
        let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) else {
            let trimmed = body.trim();
            let message = if trimmed.is_empty() {
                canonical_reason(status)
            } else {
                trimmed.to_string()
            };
            return Self::new(status, message);
        };

        let mut details = BTreeMap::new();
        let from_errors = match parsed.errors {
            Some(ErrorList::Messages(messages)) if !messages.is_empty() => {
                Some(messages.join(", "))
            }
            Some(ErrorList::Fields(fields)) if !fields.is_empty() => {
                for (field, messages) in fields {
                    let messages = match messages {
                        FieldMessages::Many(many) => many,
                        FieldMessages::One(one) => vec![one],
                    };
                    details.insert(field, messages);
                }
                Some(
                    details
                        .iter()
                        .map(|(field, messages)| format!("{field} {}", messages.join(", ")))
                        .collect::<Vec<_>>()
                        .join("; "),
                )
            }
            Some(ErrorList::Single(message)) if !message.is_empty() => Some(message),
            _ => None,
        };

        let message = from_errors
            .or(parsed.error.filter(|m| !m.is_empty()))
            .or(parsed.message.filter(|m| !m.is_empty()))
            .unwrap_or_else(|| canonical_reason(status));

        Self {
            status,
            message,
            details,
        }
    }

    /// Classifies the error by HTTP status.
    #[must_use]
    pub fn kind(&self) -> ApiErrorKind {
        match self.status {
            401 => ApiErrorKind::Unauthorized,
            403 => ApiErrorKind::Forbidden,
            404 => ApiErrorKind::NotFound,
            400 | 422 => ApiErrorKind::Validation,
            429 => ApiErrorKind::RateLimited,
            500..=599 => ApiErrorKind::Server,
            _ => ApiErrorKind::Other,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HTTP {}: {}", self.status, self.message)
    }
}

impl std::error::Error for ApiError {}

fn canonical_reason(status: u16) -> String {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .map_or_else(|| format!("HTTP status {status}"), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_network_error() {
        let e = ClientError::NetworkError {
            detail: "connection refused".to_string(),
        };
        assert_eq!(e.to_string(), "Network error: connection refused");
    }

    #[test]
    fn display_timeout() {
        let e = ClientError::Timeout {
            detail: "30s elapsed".to_string(),
        };
        assert_eq!(e.to_string(), "Request timeout: 30s elapsed");
    }

    #[test]
    fn display_api_error() {
        let e = ClientError::Api(ApiError::new(404, "Zone not found"));
        assert_eq!(e.to_string(), "API error: HTTP 404: Zone not found");
    }

    #[test]
    fn display_invalid_parameter() {
        let e = ClientError::invalid_parameter("zone_id", "must not be empty");
        assert_eq!(
            e.to_string(),
            "Invalid parameter 'zone_id': must not be empty"
        );
    }

    #[test]
    fn display_zone_not_found() {
        let e = ClientError::ZoneNotFound {
            name: "example.com".to_string(),
        };
        assert_eq!(e.to_string(), "Zone 'example.com' not found");
    }

    #[test]
    fn decode_message_list() {
        let e = ApiError::from_response(404, r#"{"errors":["Not found","Really"]}"#);
        assert_eq!(e.status, 404);
        assert_eq!(e.message, "Not found, Really");
        assert!(e.details.is_empty());
    }

    #[test]
    fn decode_field_details() {
        let e = ApiError::from_response(
            422,
            r#"{"errors":{"name":["can't be blank","is invalid"],"ttl":"must be positive"}}"#,
        );
        assert_eq!(e.kind(), ApiErrorKind::Validation);
        assert_eq!(
            e.details.get("name"),
            Some(&vec!["can't be blank".to_string(), "is invalid".to_string()])
        );
        assert_eq!(
            e.details.get("ttl"),
            Some(&vec!["must be positive".to_string()])
        );
        assert_eq!(
            e.message,
            "name can't be blank, is invalid; ttl must be positive"
        );
    }

    #[test]
    fn decode_single_error_field() {
        let e = ApiError::from_response(403, r#"{"error":"Forbidden zone"}"#);
        assert_eq!(e.message, "Forbidden zone");
        assert_eq!(e.kind(), ApiErrorKind::Forbidden);
    }

    #[test]
    fn decode_message_field() {
        let e = ApiError::from_response(500, r#"{"message":"boom"}"#);
        assert_eq!(e.message, "boom");
        assert_eq!(e.kind(), ApiErrorKind::Server);
    }

    #[test]
    fn decode_plain_text_body() {
        let e = ApiError::from_response(401, "invalid API key: Bearer nope\n");
        assert_eq!(e.message, "invalid API key: Bearer nope");
        assert_eq!(e.kind(), ApiErrorKind::Unauthorized);
    }

    #[test]
    fn decode_empty_body_uses_reason() {
        let e = ApiError::from_response(404, "");
        assert_eq!(e.message, "Not Found");
    }

    #[test]
    fn decode_empty_json_object_uses_reason() {
        let e = ApiError::from_response(429, "{}");
        assert_eq!(e.message, "Too Many Requests");
        assert_eq!(e.kind(), ApiErrorKind::RateLimited);
    }

    #[test]
    fn decode_json_without_message_uses_reason() {
        for body in [r#"{"errors":[]}"#, r#"{"error":""}"#, r#"{"errors":{}}"#] {
            let e = ApiError::from_response(503, body);
            assert_eq!(e.message, "Service Unavailable", "body: {body}");
            assert!(e.details.is_empty());
        }
    }

    #[test]
    fn expected_vs_unexpected() {
        assert!(ClientError::Api(ApiError::new(404, "x")).is_expected());
        assert!(ClientError::Api(ApiError::new(401, "x")).is_expected());
        assert!(!ClientError::Api(ApiError::new(502, "x")).is_expected());
        assert!(
            !ClientError::NetworkError {
                detail: "x".into()
            }
            .is_expected()
        );
        assert!(
            ClientError::ZoneNotFound {
                name: "x".into()
            }
            .is_expected()
        );
    }

    #[test]
    fn status_accessor() {
        assert_eq!(
            ClientError::Api(ApiError::new(400, "bad")).status(),
            Some(400)
        );
        assert_eq!(
            ClientError::ParseError {
                detail: "x".into()
            }
            .status(),
            None
        );
    }

    #[test]
    fn serialize_json_tagged() {
        let e = ClientError::Api(ApiError::new(404, "gone"));
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("\"code\":\"Api\""));
        assert!(json.contains("\"status\":404"));
        assert!(!json.contains("details"));
    }

    #[test]
    fn deserialize_all_variants() {
        let variants: Vec<ClientError> = vec![
            ClientError::NetworkError { detail: "d".into() },
            ClientError::Timeout { detail: "d".into() },
            ClientError::Api(ApiError::from_response(
                422,
                r#"{"errors":{"name":["is invalid"]}}"#,
            )),
            ClientError::ParseError { detail: "d".into() },
            ClientError::SerializationError { detail: "d".into() },
            ClientError::invalid_parameter("base_url", "bad"),
            ClientError::ZoneNotFound { name: "x.com".into() },
        ];

        for v in &variants {
            let json = serde_json::to_string(v).unwrap();
            let back: ClientError = serde_json::from_str(&json).unwrap();
            assert_eq!(&back, v);
        }
    }
}
