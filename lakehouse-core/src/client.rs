//! Generic request execution with tracing instrumentation.
//!
//! [`ApiClient`] is the shared mechanism behind every endpoint binding:
//! it turns an [`ApiRequest`] into an HTTP call, applies authentication,
//! optionally retries retryable failures, and decodes the response.

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{instrument, Span};
use url::Url;

use crate::auth::Authenticator;
use crate::constants::{POOL_MAX_IDLE_PER_HOST, REQUEST_TIMEOUT};
use crate::error::{ApiError, AuthError, ClientError, ConfigError, ValidationError};
use crate::request::ApiRequest;
use crate::response::DetailedResponse;
use crate::retry::{run_with_retry, RetryPolicy};

/// Builder for configuring an [`ApiClient`].
#[derive(Debug)]
pub struct ApiClientBuilder {
    base_url: Option<Url>,
    timeout: Duration,
    default_headers: HeaderMap,
    auth: Authenticator,
    retry: Option<RetryPolicy>,
}

impl ApiClientBuilder {
    fn new() -> Self {
        Self {
            base_url: None,
            timeout: REQUEST_TIMEOUT,
            default_headers: HeaderMap::new(),
            auth: Authenticator::NoAuth,
            retry: None,
        }
    }

    /// Sets the service URL.
    ///
    /// An empty string leaves the URL unset; requests then fail with
    /// [`ConfigError::MissingServiceUrl`] until one is provided.
    ///
    /// ## Errors
    ///
    /// Returns an error if the URL does not parse or cannot serve as a
    /// base for endpoint paths.
    pub fn service_url(mut self, url: impl AsRef<str>) -> Result<Self, ApiError> {
        self.base_url = parse_service_url(url.as_ref())?;
        Ok(self)
    }

    /// Sets the per-attempt request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Adds a default header sent with every request.
    ///
    /// ## Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, ApiError> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| ConfigError::invalid_header(format!("name: {e}")))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| ConfigError::invalid_header(format!("value: {e}")))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Sets the authenticator attached to every request.
    pub fn authenticator(mut self, auth: Authenticator) -> Self {
        self.auth = auth;
        self
    }

    /// Enables retries with the given policy.
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = Some(policy);
        self
    }

    /// Builds the [`ApiClient`].
    ///
    /// ## Errors
    ///
    /// Returns an error if the authenticator's credentials are invalid or
    /// the HTTP client cannot be constructed.
    pub fn build(self) -> Result<ApiClient, ApiError> {
        self.auth.validate()?;

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .default_headers(self.default_headers)
            .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
            .build()
            .map_err(ClientError::Request)?;

        Ok(ApiClient {
            http,
            base_url: self.base_url,
            auth: self.auth,
            retry: self.retry,
            deadline: None,
        })
    }
}

/// Async HTTP client shared by every endpoint binding.
///
/// The client holds only read-mostly configuration: base URL,
/// authenticator, retry policy, and an optional call deadline. Cloning is
/// cheap (the underlying `reqwest::Client` is reference-counted), which is
/// what [`ApiClient::with_deadline`] relies on.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Option<Url>,
    auth: Authenticator,
    retry: Option<RetryPolicy>,
    deadline: Option<Duration>,
}

/// Raw response surface before decoding.
struct RawResponse {
    status: u16,
    headers: HeaderMap,
    body: Bytes,
}

impl ApiClient {
    /// Creates a new builder.
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::new()
    }

    /// Returns the configured base URL, if any.
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Replaces the service URL.
    ///
    /// An empty string clears the URL; subsequent calls fail with
    /// [`ConfigError::MissingServiceUrl`].
    ///
    /// ## Errors
    ///
    /// Returns an error if a non-empty URL does not parse.
    pub fn set_service_url(&mut self, url: impl AsRef<str>) -> Result<(), ApiError> {
        self.base_url = parse_service_url(url.as_ref())?;
        Ok(())
    }

    /// Replaces the authenticator.
    ///
    /// ## Errors
    ///
    /// Returns an error if the new credentials are invalid.
    pub fn set_authenticator(&mut self, auth: Authenticator) -> Result<(), ApiError> {
        auth.validate()?;
        self.auth = auth;
        Ok(())
    }

    /// Enables retries with the given policy.
    pub fn enable_retries(&mut self, policy: RetryPolicy) {
        self.retry = Some(policy);
    }

    /// Disables retries; every call makes a single attempt.
    pub fn disable_retries(&mut self) {
        self.retry = None;
    }

    /// Returns `true` when a retry policy is active.
    pub fn retries_enabled(&self) -> bool {
        self.retry.is_some()
    }

    /// Returns a clone of this client whose calls are bounded by `deadline`.
    ///
    /// The deadline covers the whole call, including every retry attempt;
    /// once it expires the call fails with [`ClientError::Timeout`].
    /// Cooperative cancellation is available by dropping the call future.
    pub fn with_deadline(&self, deadline: Duration) -> Self {
        let mut scoped = self.clone();
        scoped.deadline = Some(deadline);
        scoped
    }

    /// Executes a request and decodes the JSON response into `T`.
    ///
    /// ## Errors
    ///
    /// - [`ConfigError::MissingServiceUrl`] when no base URL is set.
    /// - [`ClientError`] for transport failures and non-2xx statuses.
    /// - [`AuthError`] for 401/403 responses.
    /// - [`ValidationError`] when the body is empty or not valid JSON for
    ///   `T`; the error keeps the status and raw body for inspection.
    pub async fn execute_json<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
    ) -> Result<DetailedResponse<T>, ApiError> {
        let raw = self.execute_raw(request).await?;
        if raw.body.is_empty() {
            return Err(ValidationError::EmptyBody { status: raw.status }.into());
        }
        let result = serde_json::from_slice(&raw.body).map_err(|source| {
            ValidationError::JsonParse {
                status: raw.status,
                source,
                body: raw.body.clone(),
            }
        })?;
        Ok(DetailedResponse::new(raw.status, raw.headers, result))
    }

    /// Executes a request and passes the body through as raw bytes.
    ///
    /// Used for endpoints whose response content type is arbitrary
    /// (exports, downloads).
    pub async fn execute_binary(
        &self,
        request: &ApiRequest,
    ) -> Result<DetailedResponse<Bytes>, ApiError> {
        let raw = self.execute_raw(request).await?;
        Ok(DetailedResponse::new(raw.status, raw.headers, raw.body))
    }

    /// Executes a request and discards the response body.
    ///
    /// Used for endpoints that return no content (deletes, actions).
    pub async fn execute_empty(
        &self,
        request: &ApiRequest,
    ) -> Result<DetailedResponse<()>, ApiError> {
        let raw = self.execute_raw(request).await?;
        Ok(DetailedResponse::new(raw.status, raw.headers, ()))
    }

    /// Runs the retry loop under the optional call deadline.
    async fn execute_raw(&self, request: &ApiRequest) -> Result<RawResponse, ApiError> {
        let operation = format!("{} /{}", request.method(), request.segments().join("/"));
        let attempts = async {
            match &self.retry {
                Some(policy) => {
                    run_with_retry(policy, &operation, || self.attempt(request)).await
                }
                None => self.attempt(request).await,
            }
        };

        match self.deadline {
            Some(deadline) => match tokio::time::timeout(deadline, attempts).await {
                Ok(result) => result,
                Err(_) => Err(ClientError::Timeout {
                    duration_ms: deadline.as_millis() as u64,
                }
                .into()),
            },
            None => attempts.await,
        }
    }

    /// Makes a single HTTP attempt.
    #[instrument(
        name = "api_request",
        skip(self, request),
        fields(
            http.method = %request.method(),
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    async fn attempt(&self, request: &ApiRequest) -> Result<RawResponse, ApiError> {
        let url = self.build_url(request)?;
        Span::current().record("http.url", url.as_str());

        let mut builder = self.http.request(request.method().to_reqwest(), url);
        builder = self.auth.apply(builder);
        builder = builder.headers(request.headers().clone());
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(ClientError::Request)?;

        let status = response.status();
        let status_code = status.as_u16();
        Span::current().record("http.status_code", status_code);

        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            let message = error_message_from_body(status, &body);

            let otel_status = if status.is_server_error() {
                "ERROR"
            } else {
                "UNSET"
            };
            Span::current().record("otel.status_code", otel_status);

            if status_code == 401 {
                return Err(AuthError::AuthenticationFailed { message }.into());
            }
            if status_code == 403 {
                return Err(AuthError::InsufficientPermissions { operation: message }.into());
            }

            return Err(ClientError::HttpStatus {
                status: status_code,
                message,
            }
            .into());
        }

        Span::current().record("otel.status_code", "OK");

        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(ClientError::Request)?;

        Ok(RawResponse {
            status: status_code,
            headers,
            body,
        })
    }

    /// Joins the base URL with the request's path segments and query.
    fn build_url(&self, request: &ApiRequest) -> Result<Url, ApiError> {
        let base = self
            .base_url
            .as_ref()
            .ok_or(ConfigError::MissingServiceUrl)?;

        let mut url = base.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| ConfigError::NotABaseUrl {
                url: base.to_string(),
            })?;
            segments
                .pop_if_empty()
                .extend(request.segments().iter().map(String::as_str));
        }
        for (key, value) in request.query_params() {
            url.query_pairs_mut().append_pair(key, value);
        }
        Ok(url)
    }
}

/// Parses a caller-supplied service URL; empty input clears the URL.
fn parse_service_url(url: &str) -> Result<Option<Url>, ApiError> {
    if url.is_empty() {
        return Ok(None);
    }
    let parsed = Url::parse(url).map_err(ConfigError::InvalidUrl)?;
    if parsed.cannot_be_a_base() {
        return Err(ConfigError::NotABaseUrl {
            url: url.to_string(),
        }
        .into());
    }
    Ok(Some(parsed))
}

/// Pulls a human-readable error message out of an error response body.
///
/// The service reports errors as JSON with `message`, `error`, or
/// `errors[0].message` fields; non-JSON bodies fall back to raw text, and
/// empty bodies to the canonical status string.
fn error_message_from_body(status: StatusCode, body: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
        for candidate in [
            value.get("message"),
            value.get("error"),
            value
                .get("errors")
                .and_then(|e| e.get(0))
                .and_then(|e| e.get("message")),
        ]
        .into_iter()
        .flatten()
        {
            if let Some(text) = candidate.as_str() {
                return text.to_string();
            }
        }
    }

    let text = String::from_utf8_lossy(body);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        status.to_string()
    } else {
        trimmed.to_string()
    }
}
