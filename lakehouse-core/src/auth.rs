//! Pluggable request authentication.
//!
//! The Lakehouse Data service accepts unauthenticated requests (local
//! development), HTTP basic credentials, and bearer tokens. The
//! [`Authenticator`] is attached to the client once and applied to every
//! outgoing request.

use crate::error::AuthError;

/// Authentication scheme attached to outgoing requests.
///
/// ## Examples
///
/// ```rust
/// use lakehouse_core::Authenticator;
///
/// let auth = Authenticator::bearer("sk-abc123");
/// assert_eq!(auth.auth_type(), "bearer");
/// assert!(auth.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authenticator {
    /// No credentials are attached.
    NoAuth,
    /// HTTP basic authentication.
    Basic {
        /// The username.
        username: String,
        /// The password.
        password: String,
    },
    /// Bearer token in the `Authorization` header.
    Bearer {
        /// The token, without the `Bearer ` prefix.
        token: String,
    },
}

impl Authenticator {
    /// Creates a basic authenticator.
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Creates a bearer token authenticator.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Returns the canonical name of this authentication type.
    pub fn auth_type(&self) -> &'static str {
        match self {
            Self::NoAuth => "noauth",
            Self::Basic { .. } => "basic",
            Self::Bearer { .. } => "bearer",
        }
    }

    /// Validates that the credentials this scheme needs are present.
    ///
    /// ## Errors
    ///
    /// Returns [`AuthError::InvalidCredentialFormat`] when a required
    /// credential is empty.
    pub fn validate(&self) -> Result<(), AuthError> {
        match self {
            Self::NoAuth => Ok(()),
            Self::Basic { username, password } => {
                if username.is_empty() || password.is_empty() {
                    return Err(AuthError::InvalidCredentialFormat { auth_type: "basic" });
                }
                Ok(())
            }
            Self::Bearer { token } => {
                if token.is_empty() {
                    return Err(AuthError::InvalidCredentialFormat { auth_type: "bearer" });
                }
                Ok(())
            }
        }
    }

    /// Applies this scheme's credentials to a request builder.
    pub fn apply(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self {
            Self::NoAuth => request,
            Self::Basic { username, password } => request.basic_auth(username, Some(password)),
            Self::Bearer { token } => request.bearer_auth(token),
        }
    }
}

impl Default for Authenticator {
    fn default() -> Self {
        Self::NoAuth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_type_names() {
        assert_eq!(Authenticator::NoAuth.auth_type(), "noauth");
        assert_eq!(Authenticator::basic("u", "p").auth_type(), "basic");
        assert_eq!(Authenticator::bearer("t").auth_type(), "bearer");
    }

    #[test]
    fn test_noauth_always_valid() {
        assert!(Authenticator::NoAuth.validate().is_ok());
    }

    #[test]
    fn test_basic_rejects_empty_username() {
        let auth = Authenticator::basic("", "secret");
        assert!(matches!(
            auth.validate(),
            Err(AuthError::InvalidCredentialFormat { auth_type: "basic" })
        ));
    }

    #[test]
    fn test_basic_rejects_empty_password() {
        let auth = Authenticator::basic("admin", "");
        assert!(auth.validate().is_err());
    }

    #[test]
    fn test_bearer_rejects_empty_token() {
        let auth = Authenticator::bearer("");
        assert!(matches!(
            auth.validate(),
            Err(AuthError::InvalidCredentialFormat { auth_type: "bearer" })
        ));
    }

    #[test]
    fn test_bearer_accepts_token() {
        assert!(Authenticator::bearer("sk-123").validate().is_ok());
    }
}
