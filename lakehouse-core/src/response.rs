//! Decoded response wrapper.

use reqwest::header::HeaderMap;

/// A decoded API response together with its HTTP status and headers.
///
/// Every operation returns one of these on success so callers can always
/// inspect the transport-level details alongside the typed result.
///
/// ## Examples
///
/// ```rust,ignore
/// let response = client.list_buckets(&opts).await?;
/// assert_eq!(response.status(), 200);
/// for bucket in &response.result().buckets {
///     println!("{}", bucket.bucket_display_name);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct DetailedResponse<T> {
    status: u16,
    headers: HeaderMap,
    result: T,
}

impl<T> DetailedResponse<T> {
    /// Wraps a decoded result with its transport details.
    pub fn new(status: u16, headers: HeaderMap, result: T) -> Self {
        Self {
            status,
            headers,
            result,
        }
    }

    /// Returns the HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns the response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns a reference to the decoded result.
    pub fn result(&self) -> &T {
        &self.result
    }

    /// Consumes the response, returning the decoded result.
    pub fn into_result(self) -> T {
        self.result
    }
}
