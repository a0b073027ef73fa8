use crate::{ApiClient, ApiResponse, ClientConfig, ConfigError, Query, RequestBody, Result, Users};

/// Entry point bundling an [`ApiClient`] with resource views.
///
/// # Example
///
/// ```no_run
/// use nestjs_api_sdk::{ClientConfig, NestJsApiSdk};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let sdk = NestJsApiSdk::new(
///     ClientConfig::new("https://api.yourapp.com").with_api_key("your-api-key"),
/// )?;
///
/// let users = sdk.users().list([("page", 1), ("limit", 10)]).await?;
/// println!("{:?}", users.data);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct NestJsApiSdk {
    client: ApiClient,
}

impl NestJsApiSdk {
    pub fn new(config: ClientConfig) -> std::result::Result<Self, ConfigError> {
        Ok(Self::from_client(ApiClient::new(config)?))
    }

    pub fn from_client(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn users(&self) -> Users<'_> {
        Users::new(&self.client)
    }

    pub async fn get(&self, path: &str, query: impl Into<Query>) -> Result<ApiResponse> {
        self.client.get(path, query).await
    }

    pub async fn post(&self, path: &str, body: impl Into<RequestBody>) -> Result<ApiResponse> {
        self.client.post(path, body).await
    }

    pub async fn put(&self, path: &str, body: impl Into<RequestBody>) -> Result<ApiResponse> {
        self.client.put(path, body).await
    }

    pub async fn patch(&self, path: &str, body: impl Into<RequestBody>) -> Result<ApiResponse> {
        self.client.patch(path, body).await
    }

    pub async fn delete(&self, path: &str) -> Result<ApiResponse> {
        self.client.delete(path).await
    }

    pub fn set_api_key(&self, api_key: impl AsRef<str>) {
        self.client.set_api_key(api_key);
    }

    pub fn set_base_url(
        &self,
        base_url: impl Into<String>,
    ) -> std::result::Result<(), ConfigError> {
        self.client.set_base_url(base_url)
    }
}
