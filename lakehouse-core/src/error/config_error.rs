//! Client and request configuration errors.

use thiserror::Error;

/// Errors in client or per-request configuration.
///
/// These errors are raised before any network I/O happens, typically
/// indicating programmer errors or invalid external configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No service URL is configured on the client.
    #[error("No service URL is configured; set one before making requests")]
    MissingServiceUrl,

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A required request field is unset or empty.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// The configured URL cannot serve as a base for endpoint paths.
    #[error("Service URL cannot be used as a base URL: {url}")]
    NotABaseUrl {
        /// The offending URL.
        url: String,
    },

    /// A header name or value could not be constructed.
    #[error("Invalid header: {message}")]
    InvalidHeader {
        /// Description of the offending header.
        message: String,
    },

    /// An environment variable held an unrecognized authentication type.
    #[error("Unknown auth type '{value}' (expected noauth, basic, or bearer)")]
    InvalidAuthType {
        /// The value found in the environment.
        value: String,
    },

    /// The request body could not be serialized to JSON.
    #[error("Request body serialization failed: {0}")]
    BodySerialization(#[from] serde_json::Error),
}

impl ConfigError {
    /// Creates a missing field error.
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Creates an invalid header error.
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field() {
        let err = ConfigError::missing_field("bucket_id");
        assert_eq!(err.to_string(), "Missing required field: bucket_id");
    }

    #[test]
    fn test_missing_service_url() {
        let err = ConfigError::MissingServiceUrl;
        assert!(err.to_string().contains("service URL"));
    }

    #[test]
    fn test_invalid_url() {
        let url_err = url::Url::parse("not-a-url").unwrap_err();
        let err = ConfigError::InvalidUrl(url_err);
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_invalid_auth_type() {
        let err = ConfigError::InvalidAuthType {
            value: "oauth7".to_string(),
        };
        assert!(err.to_string().contains("oauth7"));
    }
}
