//! HTTP methods used by the Lakehouse Data API.

use strum::{Display, EnumIter, EnumString};

/// The HTTP methods the Lakehouse Data API uses.
///
/// The service surface is plain CRUD plus a handful of action endpoints,
/// so only the five methods that actually appear in the API are modeled.
///
/// ## Examples
///
/// ```rust
/// use lakehouse_core::RestMethod;
///
/// let method = RestMethod::Patch;
/// assert!(method.has_body());
/// assert!(!method.is_idempotent());
///
/// let parsed: RestMethod = "DELETE".parse().unwrap();
/// assert_eq!(parsed, RestMethod::Delete);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum RestMethod {
    /// HTTP GET - Retrieve a resource.
    Get,
    /// HTTP POST - Create a resource or trigger an action.
    Post,
    /// HTTP PUT - Replace a resource entirely.
    Put,
    /// HTTP PATCH - Partially update a resource.
    Patch,
    /// HTTP DELETE - Remove a resource.
    Delete,
}

impl RestMethod {
    /// Returns `true` if this method carries a request body.
    pub fn has_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }

    /// Returns `true` if this method is idempotent.
    ///
    /// Retries of non-idempotent methods are still safe here because the
    /// executor only retries failures that never reached the application
    /// (connect errors) or that the server explicitly rejected (429/5xx).
    pub fn is_idempotent(&self) -> bool {
        !matches!(self, Self::Post | Self::Patch)
    }

    /// Converts to the equivalent `reqwest::Method`.
    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl From<RestMethod> for reqwest::Method {
    fn from(method: RestMethod) -> Self {
        method.to_reqwest()
    }
}
