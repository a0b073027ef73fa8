use std::fmt;

use serde::Deserialize;

/// Connection, timeout and retry settings for [`crate::ApiClient`].
#[derive(Clone, Eq, PartialEq, Deserialize)]
pub struct ClientConfig {
    /// Base URL every relative request path is resolved against.
    pub base_url: String,
    /// Bearer credential sent as `Authorization: Bearer <key>`.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Maximum number of retries after the initial attempt.
    #[serde(default = "default_retries")]
    pub retries: usize,
    /// Base retry delay in milliseconds (linear strategy).
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// Emits one trace event per attempt when enabled.
    #[serde(default)]
    pub debug: bool,
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_retries() -> usize {
    3
}

fn default_retry_delay_ms() -> u64 {
    1_000
}

impl ClientConfig {
    /// Creates a config with default timeout and retry behavior.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout_ms: default_timeout_ms(),
            retries: default_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            debug: false,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_retries(mut self, retries: usize) -> Self {
        self.retries = retries;
        self
    }

    pub fn with_retry_delay_ms(mut self, retry_delay_ms: u64) -> Self {
        self.retry_delay_ms = retry_delay_ms;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout_ms", &self.timeout_ms)
            .field("retries", &self.retries)
            .field("retry_delay_ms", &self.retry_delay_ms)
            .field("debug", &self.debug)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::ClientConfig;

    #[test]
    fn new_uses_documented_defaults() {
        let config = ClientConfig::new("https://api.example.com");
        assert_eq!(config.api_key, None);
        assert_eq!(config.timeout_ms, 30_000);
        assert_eq!(config.retries, 3);
        assert_eq!(config.retry_delay_ms, 1_000);
        assert!(!config.debug);
    }

    #[test]
    fn deserialize_from_mapping_fills_defaults() {
        let config: ClientConfig = serde_json::from_value(serde_json::json!({
            "base_url": "https://api.example.com",
            "api_key": "test-api-key",
            "debug": true
        }))
        .expect("config must deserialize");

        assert_eq!(
            config,
            ClientConfig::new("https://api.example.com")
                .with_api_key("test-api-key")
                .with_debug(true)
        );
    }

    #[test]
    fn deserialize_requires_base_url() {
        let result = serde_json::from_value::<ClientConfig>(serde_json::json!({ "retries": 1 }));
        assert!(result.is_err());
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = ClientConfig::new("https://api.example.com").with_api_key("secret-key");
        let debug = format!("{config:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("secret-key"));
    }
}
