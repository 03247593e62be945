//! Outgoing request description.
//!
//! An [`ApiRequest`] is the executor's input: method, path segments, query
//! parameters, per-request headers, and an optional JSON body. Path
//! parameters are passed as plain segment values; the executor appends them
//! through `url::PathSegmentsMut`, which percent-encodes anything unsafe.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;

use crate::error::ConfigError;
use crate::method::RestMethod;

/// A fully described API request, ready for execution.
///
/// ## Examples
///
/// ```rust
/// use lakehouse_core::{ApiRequest, RestMethod};
///
/// let request = ApiRequest::get(&["buckets", "my-bucket", "objects"])
///     .query("path", "warehouse/")
///     .query_opt("limit", None::<&str>);
/// assert_eq!(request.method(), RestMethod::Get);
/// ```
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: RestMethod,
    segments: Vec<String>,
    query: Vec<(String, String)>,
    headers: HeaderMap,
    body: Option<serde_json::Value>,
}

impl ApiRequest {
    /// Creates a request with the given method and path segments.
    pub fn new(method: RestMethod, segments: &[&str]) -> Self {
        Self {
            method,
            segments: segments.iter().map(|s| (*s).to_string()).collect(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Creates a GET request.
    pub fn get(segments: &[&str]) -> Self {
        Self::new(RestMethod::Get, segments)
    }

    /// Creates a POST request.
    pub fn post(segments: &[&str]) -> Self {
        Self::new(RestMethod::Post, segments)
    }

    /// Creates a PUT request.
    pub fn put(segments: &[&str]) -> Self {
        Self::new(RestMethod::Put, segments)
    }

    /// Creates a PATCH request.
    pub fn patch(segments: &[&str]) -> Self {
        Self::new(RestMethod::Patch, segments)
    }

    /// Creates a DELETE request.
    pub fn delete(segments: &[&str]) -> Self {
        Self::new(RestMethod::Delete, segments)
    }

    /// Appends a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Appends a query parameter when the value is present.
    pub fn query_opt(self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.query(key, v),
            None => self,
        }
    }

    /// Adds a per-request header.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidHeader`] if the name or value is not a
    /// legal HTTP header.
    pub fn header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, ConfigError> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| ConfigError::invalid_header(format!("name: {e}")))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| ConfigError::invalid_header(format!("value: {e}")))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Sets the JSON request body.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::BodySerialization`] if the value cannot be
    /// serialized.
    pub fn json_body<T: Serialize>(mut self, body: &T) -> Result<Self, ConfigError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Returns the HTTP method.
    pub fn method(&self) -> RestMethod {
        self.method
    }

    /// Returns the path segments.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns the query parameters.
    pub fn query_params(&self) -> &[(String, String)] {
        &self.query
    }

    /// Returns the per-request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the JSON body, if set.
    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }
}
