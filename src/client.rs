use std::fmt;
use std::time::Duration;

use arc_swap::ArcSwap;
use reqwest::{header, Method};
use tokio::time::sleep;

use crate::{
    decode::{self, RawResponse},
    ApiError, ApiResponse, ClientConfig, ConfigError, Query, RequestBody, RequestOptions,
    Result,
};

/// Base URL and authorization value shared by all requests of a client.
#[derive(Debug)]
struct Endpoint {
    base_url: String,
    authorization: Option<String>,
}

/// Outcome of one attempt inside the retry loop.
enum Decision {
    Retry,
    Succeed(ApiResponse),
    Fail(ApiError),
}

/// HTTP client with bounded retries and uniform error normalization.
pub struct ApiClient {
    http: reqwest::Client,
    endpoint: ArcSwap<Endpoint>,
    timeout: Duration,
    retries: usize,
    retry_delay: Duration,
    debug: bool,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let endpoint = self.endpoint.load();
        f.debug_struct("ApiClient")
            .field("base_url", &endpoint.base_url)
            .field(
                "authorization",
                &endpoint.authorization.as_ref().map(|_| "<redacted>"),
            )
            .field("timeout", &self.timeout)
            .field("retries", &self.retries)
            .field("retry_delay", &self.retry_delay)
            .field("debug", &self.debug)
            .finish()
    }
}

impl ApiClient {
    /// Validates `config` and creates a client.
    pub fn new(config: ClientConfig) -> std::result::Result<Self, ConfigError> {
        decode::validate_base_url(&config.base_url)?;
        if config.timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        let http = reqwest::Client::builder()
            .build()
            .map_err(ConfigError::HttpClient)?;

        Ok(Self {
            http,
            endpoint: ArcSwap::from_pointee(Endpoint {
                base_url: config.base_url,
                authorization: config
                    .api_key
                    .as_deref()
                    .map(normalize_bearer_authorization),
            }),
            timeout: Duration::from_millis(config.timeout_ms),
            retries: config.retries,
            retry_delay: Duration::from_millis(config.retry_delay_ms),
            debug: config.debug,
        })
    }

    pub fn base_url(&self) -> String {
        self.endpoint.load().base_url.clone()
    }

    pub fn retries(&self) -> usize {
        self.retries
    }

    /// Replaces the bearer credential for subsequent requests.
    ///
    /// If the key is missing the `Bearer ` prefix, it is added automatically.
    pub fn set_api_key(&self, api_key: impl AsRef<str>) {
        let authorization = normalize_bearer_authorization(api_key.as_ref());
        self.endpoint.rcu(|current| Endpoint {
            base_url: current.base_url.clone(),
            authorization: Some(authorization.clone()),
        });
    }

    /// Replaces the base URL for subsequent requests.
    pub fn set_base_url(
        &self,
        base_url: impl Into<String>,
    ) -> std::result::Result<(), ConfigError> {
        let base_url = base_url.into();
        decode::validate_base_url(&base_url)?;
        self.endpoint.rcu(|current| Endpoint {
            base_url: base_url.clone(),
            authorization: current.authorization.clone(),
        });
        Ok(())
    }

    pub async fn get(&self, path: &str, query: impl Into<Query>) -> Result<ApiResponse> {
        self.request(Method::GET, path, RequestOptions::new().with_query(query))
            .await
    }

    pub async fn post(&self, path: &str, body: impl Into<RequestBody>) -> Result<ApiResponse> {
        self.request(Method::POST, path, RequestOptions::new().with_body(body))
            .await
    }

    pub async fn put(&self, path: &str, body: impl Into<RequestBody>) -> Result<ApiResponse> {
        self.request(Method::PUT, path, RequestOptions::new().with_body(body))
            .await
    }

    pub async fn patch(&self, path: &str, body: impl Into<RequestBody>) -> Result<ApiResponse> {
        self.request(Method::PATCH, path, RequestOptions::new().with_body(body))
            .await
    }

    pub async fn delete(&self, path: &str) -> Result<ApiResponse> {
        self.request(Method::DELETE, path, RequestOptions::new())
            .await
    }

    /// Performs one logical request with up to `retries + 1` attempts.
    ///
    /// Responses with status >= 500 and transport failures are retried
    /// with linear backoff. Any other status >= 400 fails immediately.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse> {
        let endpoint = self.endpoint.load_full();
        let url = decode::resolve_url(&endpoint.base_url, path)?;
        let body = options.body.into_bytes()?;

        let mut attempt = 0usize;
        loop {
            if self.debug {
                tracing::info!(attempt = attempt + 1, "[API Client] {} {}", method, url);
            }

            let received = self
                .send_once(&method, &url, &endpoint, &options.query, body.as_deref())
                .await;

            match self.decide(received, attempt) {
                Decision::Succeed(response) => return Ok(response),
                Decision::Fail(err) => return Err(err),
                Decision::Retry => {
                    attempt += 1;
                    self.wait_before_retry(attempt).await;
                }
            }
        }
    }

    async fn send_once(
        &self,
        method: &Method,
        url: &reqwest::Url,
        endpoint: &Endpoint,
        query: &Query,
        body: Option<&[u8]>,
    ) -> std::result::Result<RawResponse, reqwest::Error> {
        let mut builder = self
            .http
            .request(method.clone(), url.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .timeout(self.timeout);

        if let Some(authorization) = &endpoint.authorization {
            builder = builder.header(header::AUTHORIZATION, authorization);
        }
        if !query.is_empty() {
            builder = builder.query(&query.0);
        }
        if let Some(body) = body {
            builder = builder.body(body.to_vec());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = decode::collect_headers(response.headers());
        let body = decode::body_text(&response.bytes().await?);

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }

    fn decide(
        &self,
        received: std::result::Result<RawResponse, reqwest::Error>,
        attempt: usize,
    ) -> Decision {
        let attempts_left = attempt < self.retries;
        match received {
            Ok(raw) if raw.status >= 500 && attempts_left => Decision::Retry,
            Ok(raw) if raw.status < 400 => Decision::Succeed(decode::decode_success(raw)),
            Ok(raw) => Decision::Fail(decode::decode_error(&raw)),
            Err(_) if attempts_left => Decision::Retry,
            Err(err) => Decision::Fail(ApiError::network(&err)),
        }
    }

    /// Waits `retry_delay * retry` before the next attempt.
    async fn wait_before_retry(&self, retry: usize) {
        let multiplier = u32::try_from(retry).unwrap_or(u32::MAX);
        let delay = self.retry_delay.saturating_mul(multiplier);

        tracing::debug!("retrying request after {} ms", delay.as_millis());

        sleep(delay).await;
    }
}

fn normalize_bearer_authorization(token: &str) -> String {
    let trimmed = token.trim();
    let prefix = trimmed.get(..7);
    if prefix.is_some_and(|value| value.eq_ignore_ascii_case("bearer ")) {
        trimmed.to_owned()
    } else {
        format!("Bearer {trimmed}")
    }
}
