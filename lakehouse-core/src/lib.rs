//! # `lakehouse-core` - generic request executor for the Lakehouse Data SDK
//!
//! This crate provides the service-agnostic plumbing every endpoint binding
//! in [`lakehouse-data`](../lakehouse_data/index.html) delegates to:
//!
//! - **Request execution** ([`client`]) - URL assembly, auth, dispatch,
//!   response decoding, with tracing spans per request
//! - **Authentication** ([`auth`]) - no-auth, basic, and bearer schemes
//! - **Retries** ([`retry`]) - opt-in exponential backoff for retryable
//!   failures
//! - **External configuration** ([`config`]) - environment-variable driven
//!   client construction
//! - **Layered errors** ([`error`]) - config, auth, client, and validation
//!   categories under one [`ApiError`](error::ApiError)
//!
//! ## Example
//!
//! ```rust,ignore
//! use lakehouse_core::{ApiClient, ApiRequest, Authenticator};
//!
//! let client = ApiClient::builder()
//!     .service_url("https://api.us-south.lakehouse.dev")?
//!     .authenticator(Authenticator::bearer(token))
//!     .build()?;
//!
//! let request = ApiRequest::get(&["api", "v1", "buckets"]);
//! let response: DetailedResponse<ListBucketsResponse> =
//!     client.execute_json(&request).await?;
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod method;
pub mod request;
pub mod response;
pub mod retry;

// Re-export the types endpoint bindings touch on every call.
pub use auth::Authenticator;
pub use client::{ApiClient, ApiClientBuilder};
pub use config::ExternalConfig;
pub use error::ApiError;
pub use method::RestMethod;
pub use request::ApiRequest;
pub use response::DetailedResponse;
pub use retry::RetryPolicy;
