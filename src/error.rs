/// Terminal failure of a request.
///
/// `status` is `0` when no HTTP response was involved.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("API error {status} ({code}): {message}")]
pub struct ApiError {
    /// Human-readable message, server-supplied when available.
    pub message: String,
    /// HTTP status code, or `0` for transport and local failures.
    pub status: u16,
    /// Server-supplied error code or one of the sentinel constants.
    pub code: String,
    /// Structured details taken from the error body.
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Code used when the error body carries no `code`.
    pub const UNKNOWN_ERROR: &'static str = "UNKNOWN_ERROR";
    /// Code used when the request never produced an HTTP response.
    pub const NETWORK_ERROR: &'static str = "NETWORK_ERROR";
    /// Code used when the request could not be built locally.
    pub const INVALID_REQUEST: &'static str = "INVALID_REQUEST";

    pub(crate) fn network(err: &reqwest::Error) -> Self {
        Self {
            message: err.to_string(),
            status: 0,
            code: Self::NETWORK_ERROR.to_owned(),
            details: None,
        }
    }

    pub(crate) fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: 0,
            code: Self::INVALID_REQUEST.to_owned(),
            details: None,
        }
    }

    /// Returns `true` when the failure happened below HTTP.
    pub fn is_network(&self) -> bool {
        self.status == 0 && self.code == Self::NETWORK_ERROR
    }
}

/// Error returned while building or reconfiguring a client.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Base URL is not an absolute `http`/`https` URL.
    #[error("invalid base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    /// Request timeout must be greater than zero.
    #[error("timeout must be greater than zero")]
    ZeroTimeout,
    /// Underlying HTTP client could not be initialized.
    #[error("http client initialization failed: {0}")]
    HttpClient(#[source] reqwest::Error),
}
