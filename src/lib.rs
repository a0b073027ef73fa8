//! `nestjs-api-sdk` is an async HTTP client SDK for NestJS-style REST APIs.
//!
//! The crate is split in two layers:
//! - [`ApiClient`] performs requests with bounded retries and normalizes
//!   failures into [`ApiError`].
//! - [`NestJsApiSdk`] owns a client and exposes resource views such as
//!   [`NestJsApiSdk::users`].

mod client;
mod decode;
mod error;
mod options;
mod params;
mod sdk;
mod types;
mod users;

pub use client::ApiClient;
pub use error::{ApiError, ConfigError};
pub use options::ClientConfig;
pub use params::{Query, RequestBody, RequestOptions};
pub use reqwest::Method;
pub use sdk::NestJsApiSdk;
pub use types::{ApiResponse, Payload};
pub use users::Users;

pub type Result<T> = std::result::Result<T, ApiError>;
