//! Top-level API error type.

use super::{AuthError, ClientError, ConfigError, ValidationError};
use thiserror::Error;

/// Top-level error type for all API operations.
///
/// This enum aggregates all error categories, enabling unified error handling
/// while preserving the ability to match on specific error types when needed.
///
/// ## Examples
///
/// ```rust,ignore
/// use lakehouse_core::error::ApiError;
///
/// fn handle_error(err: ApiError) {
///     match err {
///         ApiError::Config(e) => eprintln!("Bad configuration: {e}"),
///         ApiError::Client(e) => eprintln!("Network error: {e}"),
///         ApiError::Validation(e) => eprintln!("Undecodable response: {e}"),
///         ApiError::Auth(e) => eprintln!("Auth failed: {e}"),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// Client or request configuration errors (missing URL, unset fields).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// HTTP client errors (network, timeout, non-2xx status).
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Response decoding errors.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Authentication and authorization errors.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl ApiError {
    /// Returns `true` if retrying the request could succeed.
    ///
    /// Configuration, validation, and auth errors are deterministic and
    /// never retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Client(e) => e.is_retryable(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_client_error() {
        let client_err = ClientError::Timeout { duration_ms: 5000 };
        let api_err: ApiError = client_err.into();
        assert!(matches!(api_err, ApiError::Client(_)));
    }

    #[test]
    fn test_from_config_error() {
        let cfg_err = ConfigError::MissingServiceUrl;
        let api_err: ApiError = cfg_err.into();
        assert!(matches!(api_err, ApiError::Config(_)));
        assert!(!api_err.is_retryable());
    }

    #[test]
    fn test_retryable_passthrough() {
        let err: ApiError = ClientError::HttpStatus {
            status: 503,
            message: "unavailable".to_string(),
        }
        .into();
        assert!(err.is_retryable());

        let err: ApiError = ClientError::HttpStatus {
            status: 404,
            message: "not found".to_string(),
        }
        .into();
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::Config(ConfigError::MissingServiceUrl);
        assert!(err.to_string().contains("service URL"));
    }
}
