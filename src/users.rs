use std::fmt::Display;

use crate::{ApiClient, ApiResponse, Query, RequestBody, Result};

/// `/users` endpoints.
#[derive(Clone, Copy, Debug)]
pub struct Users<'a> {
    client: &'a ApiClient,
}

impl<'a> Users<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `GET /users`
    pub async fn list(&self, query: impl Into<Query>) -> Result<ApiResponse> {
        self.client.get("/users", query).await
    }

    /// `GET /users/{id}`
    pub async fn get(&self, id: impl Display) -> Result<ApiResponse> {
        self.client.get(&format!("/users/{id}"), ()).await
    }

    /// `POST /users`
    pub async fn create(&self, body: impl Into<RequestBody>) -> Result<ApiResponse> {
        self.client.post("/users", body).await
    }

    /// `PATCH /users/{id}`
    pub async fn update(
        &self,
        id: impl Display,
        body: impl Into<RequestBody>,
    ) -> Result<ApiResponse> {
        self.client.patch(&format!("/users/{id}"), body).await
    }

    /// `DELETE /users/{id}`
    pub async fn delete(&self, id: impl Display) -> Result<ApiResponse> {
        self.client.delete(&format!("/users/{id}")).await
    }
}
