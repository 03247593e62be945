//! The Lakehouse Data service client.

use std::time::Duration;

use lakehouse_core::{ApiClient, ApiError, Authenticator, ExternalConfig, RetryPolicy};

use crate::region::Region;

/// Default service endpoint (Dallas).
pub const DEFAULT_SERVICE_URL: &str = "https://api.us-south.lakehouse.dev";

/// Environment-variable prefix for external configuration.
pub const DEFAULT_SERVICE_NAME: &str = "LAKEHOUSE_DATA";

/// Header carrying the service instance identifier.
pub const INSTANCE_ID_HEADER: &str = "Lh-Instance-Id";

/// Client for the Lakehouse Data management API.
///
/// One thin async method per API operation; all of them delegate to the
/// shared executor in `lakehouse-core`. The client holds only read-mostly
/// configuration and is cheap to clone.
///
/// ## Examples
///
/// ```rust,ignore
/// use lakehouse_data::{LakehouseDataClient, Region};
/// use lakehouse_core::Authenticator;
///
/// let client = LakehouseDataClient::builder()
///     .service_url(Region::EuDe.service_url())?
///     .authenticator(Authenticator::bearer(token))
///     .instance_id("crn:inst:42")
///     .build()?;
///
/// let buckets = client.list_buckets(&Default::default()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct LakehouseDataClient {
    core: ApiClient,
}

/// Builder for [`LakehouseDataClient`].
#[derive(Debug)]
pub struct LakehouseDataClientBuilder {
    service_url: String,
    authenticator: Authenticator,
    instance_id: Option<String>,
    retry: Option<RetryPolicy>,
    timeout: Option<Duration>,
}

impl LakehouseDataClientBuilder {
    fn new() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            authenticator: Authenticator::NoAuth,
            instance_id: None,
            retry: None,
            timeout: None,
        }
    }

    /// Overrides the service URL (defaults to [`DEFAULT_SERVICE_URL`]).
    pub fn service_url(mut self, url: impl Into<String>) -> Self {
        self.service_url = url.into();
        self
    }

    /// Points the client at a named region's public endpoint.
    pub fn region(self, region: Region) -> Self {
        self.service_url(region.service_url())
    }

    /// Sets the authenticator attached to every request.
    pub fn authenticator(mut self, auth: Authenticator) -> Self {
        self.authenticator = auth;
        self
    }

    /// Sets the instance identifier sent as the `Lh-Instance-Id` header.
    pub fn instance_id(mut self, id: impl Into<String>) -> Self {
        self.instance_id = Some(id.into());
        self
    }

    /// Enables retries with the given policy.
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = Some(policy);
        self
    }

    /// Overrides the per-attempt request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// ## Errors
    ///
    /// Returns an error for an unparseable service URL, invalid
    /// credentials, or an invalid instance-id header value.
    pub fn build(self) -> Result<LakehouseDataClient, ApiError> {
        let mut builder = ApiClient::builder()
            .service_url(&self.service_url)?
            .authenticator(self.authenticator);
        if let Some(instance_id) = &self.instance_id {
            builder = builder.default_header(INSTANCE_ID_HEADER, instance_id)?;
        }
        if let Some(policy) = self.retry {
            builder = builder.retry_policy(policy);
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(LakehouseDataClient {
            core: builder.build()?,
        })
    }
}

impl LakehouseDataClient {
    /// Creates a new builder.
    pub fn builder() -> LakehouseDataClientBuilder {
        LakehouseDataClientBuilder::new()
    }

    /// Constructs a client from `LAKEHOUSE_DATA_*` environment variables.
    ///
    /// Recognized variables: `LAKEHOUSE_DATA_URL`,
    /// `LAKEHOUSE_DATA_AUTH_TYPE`, `LAKEHOUSE_DATA_BEARER_TOKEN`,
    /// `LAKEHOUSE_DATA_USERNAME`, `LAKEHOUSE_DATA_PASSWORD`, and
    /// `LAKEHOUSE_DATA_INSTANCE_ID`. An unset URL falls back to
    /// [`DEFAULT_SERVICE_URL`].
    ///
    /// ## Errors
    ///
    /// Returns an error when the variables name an unknown auth type or
    /// omit the credentials that type requires.
    pub fn from_env() -> Result<Self, ApiError> {
        let config = ExternalConfig::from_env(DEFAULT_SERVICE_NAME)?;
        let mut builder = Self::builder().authenticator(config.authenticator);
        if let Some(url) = config.url {
            builder = builder.service_url(url);
        }
        if let Some(instance_id) = config.instance_id {
            builder = builder.instance_id(instance_id);
        }
        builder.build()
    }

    /// Replaces the service URL; an empty string clears it, making
    /// subsequent calls fail with a missing-service-URL error.
    ///
    /// ## Errors
    ///
    /// Returns an error if a non-empty URL does not parse.
    pub fn set_service_url(&mut self, url: impl AsRef<str>) -> Result<(), ApiError> {
        self.core.set_service_url(url)
    }

    /// Replaces the authenticator.
    ///
    /// ## Errors
    ///
    /// Returns an error if the new credentials are invalid.
    pub fn set_authenticator(&mut self, auth: Authenticator) -> Result<(), ApiError> {
        self.core.set_authenticator(auth)
    }

    /// Enables retries with the given policy.
    pub fn enable_retries(&mut self, policy: RetryPolicy) {
        self.core.enable_retries(policy);
    }

    /// Disables retries.
    pub fn disable_retries(&mut self) {
        self.core.disable_retries();
    }

    /// Returns `true` when a retry policy is active.
    pub fn retries_enabled(&self) -> bool {
        self.core.retries_enabled()
    }

    /// Returns a clone of this client whose calls are bounded by
    /// `deadline`, covering every retry attempt of each call.
    pub fn with_deadline(&self, deadline: Duration) -> Self {
        Self {
            core: self.core.with_deadline(deadline),
        }
    }

    /// The shared executor the endpoint bindings delegate to.
    pub(crate) fn core(&self) -> &ApiClient {
        &self.core
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let client = LakehouseDataClient::builder().build().unwrap();
        assert_eq!(
            client.core().base_url().unwrap().as_str(),
            "https://api.us-south.lakehouse.dev/"
        );
        assert!(!client.retries_enabled());
    }

    #[test]
    fn test_builder_region_shorthand() {
        let client = LakehouseDataClient::builder()
            .region(Region::JpTok)
            .build()
            .unwrap();
        assert!(client
            .core()
            .base_url()
            .unwrap()
            .as_str()
            .starts_with("https://api.jp-tok"));
    }

    #[test]
    fn test_builder_rejects_bad_url() {
        let result = LakehouseDataClient::builder()
            .service_url("::not-a-url::")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_retry_toggle() {
        let mut client = LakehouseDataClient::builder().build().unwrap();
        client.enable_retries(RetryPolicy::default());
        assert!(client.retries_enabled());
        client.disable_retries();
        assert!(!client.retries_enabled());
    }

    #[test]
    fn test_set_service_url_empty_clears() {
        let mut client = LakehouseDataClient::builder().build().unwrap();
        client.set_service_url("").unwrap();
        assert!(client.core().base_url().is_none());
    }
}
