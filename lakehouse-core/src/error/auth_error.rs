//! Authentication and authorization errors.

use thiserror::Error;

/// Errors related to API authentication.
///
/// These errors occur during authenticator setup or when the server
/// rejects credentials.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Credentials required by the configured auth type are absent.
    #[error("Missing credentials for {auth_type} authentication (checked: {})", env_vars.join(", "))]
    MissingCredentials {
        /// The authentication type that needs credentials.
        auth_type: &'static str,
        /// The environment variables or fields that were checked.
        env_vars: Vec<String>,
    },

    /// A credential value is empty or malformed.
    #[error("Invalid credential format for {auth_type} authentication")]
    InvalidCredentialFormat {
        /// The authentication type with the bad credential.
        auth_type: &'static str,
    },

    /// Server rejected the authentication credentials (HTTP 401).
    #[error("Authentication failed: {message}")]
    AuthenticationFailed {
        /// Error message from the server.
        message: String,
    },

    /// Insufficient permissions for the requested operation (HTTP 403).
    #[error("Insufficient permissions: {operation}")]
    InsufficientPermissions {
        /// The operation that was denied.
        operation: String,
    },
}
