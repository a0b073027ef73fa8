use serde::Serialize;

use crate::ApiError;

/// Query string pairs appended to the request URL.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query(pub Vec<(String, String)>);

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one pair. Values are converted with `ToString`.
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.0.push((key.into(), value.to_string()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<()> for Query {
    fn from(_: ()) -> Self {
        Self::default()
    }
}

impl From<Vec<(String, String)>> for Query {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Query
where
    K: Into<String>,
    V: ToString,
{
    fn from(pairs: [(K, V); N]) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.to_string()))
                .collect(),
        )
    }
}

/// Request payload.
///
/// Raw and structured bodies are mutually exclusive variants.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RequestBody {
    /// No body.
    #[default]
    Empty,
    /// Bytes sent as-is.
    Raw(Vec<u8>),
    /// Structured data serialized as JSON.
    Json(serde_json::Value),
}

impl RequestBody {
    /// Serializes any `Serialize` value into a JSON body.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, ApiError> {
        serde_json::to_value(value).map(Self::Json).map_err(|err| {
            ApiError::invalid_request(format!("request body serialization failed: {err}"))
        })
    }

    pub fn raw(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Raw(bytes.into())
    }

    pub(crate) fn into_bytes(self) -> Result<Option<Vec<u8>>, ApiError> {
        match self {
            Self::Empty => Ok(None),
            Self::Raw(bytes) => Ok(Some(bytes)),
            Self::Json(value) => serde_json::to_vec(&value).map(Some).map_err(|err| {
                ApiError::invalid_request(format!("request body serialization failed: {err}"))
            }),
        }
    }
}

impl From<()> for RequestBody {
    fn from(_: ()) -> Self {
        Self::Empty
    }
}

impl From<serde_json::Value> for RequestBody {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

impl From<String> for RequestBody {
    fn from(value: String) -> Self {
        Self::Raw(value.into_bytes())
    }
}

impl From<&str> for RequestBody {
    fn from(value: &str) -> Self {
        Self::Raw(value.as_bytes().to_vec())
    }
}

impl From<Vec<u8>> for RequestBody {
    fn from(value: Vec<u8>) -> Self {
        Self::Raw(value)
    }
}

/// Per-call inputs for [`crate::ApiClient::request`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestOptions {
    /// Query string pairs.
    pub query: Query,
    /// Request payload.
    pub body: RequestBody,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<Query>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = body.into();
        self
    }
}
