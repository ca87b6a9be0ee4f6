//! Error types for the HiPay HTTP client.
//!
//! Every variant carries a static `context` naming the call that failed
//! (e.g. `"GET v1/transaction"`), which shows up in the rendered message.

use hipay::Failure;
use http::StatusCode;
use serde::Deserialize;

/// Errors that can occur while calling the HiPay API.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum HiPayError {
    /// URL parse error.
    #[error("URL parse error: {context}: {source}")]
    UrlParse {
        /// Human-readable context.
        context: &'static str,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },
    /// The configured base URL cannot carry path segments.
    #[error("Invalid base URL: {context}: {url}")]
    InvalidBaseUrl {
        /// Human-readable context.
        context: &'static str,
        /// The offending URL.
        url: String,
    },
    /// Request body serialization error.
    #[error("Failed to serialize request: {context}: {source}")]
    Serialize {
        /// Human-readable context.
        context: &'static str,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },
    /// HTTP transport error.
    #[error("HTTP error: {context}: {source}")]
    Http {
        /// Human-readable context.
        context: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
    /// JSON deserialization error.
    #[error("Failed to deserialize JSON: {context}: {source}")]
    JsonDeserialization {
        /// Human-readable context.
        context: &'static str,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },
    /// Failed to read response body.
    #[error("Failed to read response body as text: {context}: {source}")]
    ResponseBodyRead {
        /// Human-readable context.
        context: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
    /// The API rejected the request with a HiPay error body.
    #[error("HiPay API error {status}: {context}: {message}")]
    Api {
        /// Human-readable context.
        context: &'static str,
        /// The HTTP status code.
        status: StatusCode,
        /// HiPay error code, when present.
        code: Option<String>,
        /// HiPay error message.
        message: String,
        /// Longer HiPay error description, when present.
        description: Option<String>,
    },
    /// Unexpected HTTP status code without a recognizable error body.
    #[error("Unexpected HTTP status {status}: {context}: {body}")]
    HttpStatus {
        /// Human-readable context.
        context: &'static str,
        /// The HTTP status code.
        status: StatusCode,
        /// The response body.
        body: String,
    },
}

/// Error body returned by the HiPay API on rejected requests.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: Option<serde_json::Value>,
    message: String,
    #[serde(default)]
    description: Option<String>,
}

impl HiPayError {
    /// Builds an error for a non-success response.
    ///
    /// Bodies in HiPay's `{code, message, description}` format become
    /// [`HiPayError::Api`]; anything else becomes [`HiPayError::HttpStatus`].
    #[must_use]
    pub fn from_response(context: &'static str, status: StatusCode, body: String) -> Self {
        match serde_json::from_str::<ApiErrorBody>(&body) {
            Ok(api) => Self::Api {
                context,
                status,
                code: api.code.map(|code| match code {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                }),
                message: api.message,
                description: api.description,
            },
            Err(_) => Self::HttpStatus {
                context,
                status,
                body,
            },
        }
    }

    /// Returns the error kind name reported to tool callers.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::UrlParse { .. } => "UrlParseError",
            Self::InvalidBaseUrl { .. } => "InvalidBaseUrlError",
            Self::Serialize { .. } => "SerializeError",
            Self::Http { .. } => "HttpError",
            Self::JsonDeserialization { .. } => "JsonDeserializationError",
            Self::ResponseBodyRead { .. } => "ResponseBodyReadError",
            Self::Api { .. } => "ApiError",
            Self::HttpStatus { .. } => "HttpStatusError",
        }
    }

    /// Returns the HTTP status of a rejected request, if any.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } | Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if the API answered `404 Not Found`.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

impl From<HiPayError> for Failure {
    fn from(err: HiPayError) -> Self {
        match err {
            HiPayError::Api { message, .. } => Self::error("ApiError", message),
            other => Self::error(other.name(), other.to_string()),
        }
    }
}
