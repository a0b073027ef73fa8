use std::collections::HashMap;

use serde::de::DeserializeOwned;

/// Body of a successful response.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    /// Body parsed as JSON.
    Json(serde_json::Value),
    /// Raw body text, returned when the body is not valid JSON.
    Text(String),
}

impl Payload {
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Json(_) => None,
            Self::Text(text) => Some(text.as_str()),
        }
    }
}

/// Normalized result of a completed request.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub data: Payload,
    pub status: u16,
    /// Lowercased header names; repeated headers are joined with `", "`.
    pub headers: HashMap<String, String>,
    pub success: bool,
}

impl ApiResponse {
    /// Deserializes the payload into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        match &self.data {
            Payload::Json(value) => T::deserialize(value),
            Payload::Text(text) => serde_json::from_str(text),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}
