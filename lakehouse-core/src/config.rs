//! Environment-driven external configuration.
//!
//! Clients can be constructed entirely from environment variables, keyed by
//! a service name prefix. For a prefix of `LAKEHOUSE_DATA` the recognized
//! variables are:
//!
//! - `LAKEHOUSE_DATA_URL` - service endpoint
//! - `LAKEHOUSE_DATA_AUTH_TYPE` - `noauth`, `basic`, or `bearer`
//! - `LAKEHOUSE_DATA_BEARER_TOKEN` - token for `bearer`
//! - `LAKEHOUSE_DATA_USERNAME` / `LAKEHOUSE_DATA_PASSWORD` - for `basic`
//! - `LAKEHOUSE_DATA_INSTANCE_ID` - instance identification header value
//!
//! When `AUTH_TYPE` is absent, the auth scheme is inferred from whichever
//! credential variables are present (bearer wins over basic); with no
//! credentials at all the configuration is unauthenticated.

use std::env;

use crate::auth::Authenticator;
use crate::error::{ApiError, AuthError, ConfigError};

/// Suffix of the service URL variable.
pub const URL_SUFFIX: &str = "URL";
/// Suffix of the auth type variable.
pub const AUTH_TYPE_SUFFIX: &str = "AUTH_TYPE";
/// Suffix of the bearer token variable.
pub const BEARER_TOKEN_SUFFIX: &str = "BEARER_TOKEN";
/// Suffix of the basic-auth username variable.
pub const USERNAME_SUFFIX: &str = "USERNAME";
/// Suffix of the basic-auth password variable.
pub const PASSWORD_SUFFIX: &str = "PASSWORD";
/// Suffix of the instance id variable.
pub const INSTANCE_ID_SUFFIX: &str = "INSTANCE_ID";

/// Configuration loaded from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalConfig {
    /// Service URL, when `{PREFIX}_URL` is set and non-empty.
    pub url: Option<String>,
    /// Authenticator built from the credential variables.
    pub authenticator: Authenticator,
    /// Instance identifier, when `{PREFIX}_INSTANCE_ID` is set.
    pub instance_id: Option<String>,
}

impl ExternalConfig {
    /// Loads configuration for the given service prefix.
    ///
    /// The prefix is uppercased, so `"lakehouse_data"` and
    /// `"LAKEHOUSE_DATA"` read the same variables.
    ///
    /// ## Errors
    ///
    /// - [`ConfigError::InvalidAuthType`] for an unrecognized auth type.
    /// - [`AuthError::MissingCredentials`] when the chosen auth type's
    ///   credential variables are absent or empty.
    pub fn from_env(service_prefix: &str) -> Result<Self, ApiError> {
        let prefix = service_prefix.to_uppercase();
        let var = |suffix: &str| -> Option<String> {
            env::var(format!("{prefix}_{suffix}"))
                .ok()
                .filter(|v| !v.is_empty())
        };

        let token = var(BEARER_TOKEN_SUFFIX);
        let username = var(USERNAME_SUFFIX);
        let password = var(PASSWORD_SUFFIX);

        let auth_type = match var(AUTH_TYPE_SUFFIX) {
            Some(v) => v.to_lowercase(),
            None if token.is_some() => "bearer".to_string(),
            None if username.is_some() || password.is_some() => "basic".to_string(),
            None => "noauth".to_string(),
        };

        let authenticator = match auth_type.as_str() {
            "noauth" => Authenticator::NoAuth,
            "bearer" => {
                let token = token.ok_or_else(|| AuthError::MissingCredentials {
                    auth_type: "bearer",
                    env_vars: vec![format!("{prefix}_{BEARER_TOKEN_SUFFIX}")],
                })?;
                Authenticator::bearer(token)
            }
            "basic" => {
                let (Some(username), Some(password)) = (username, password) else {
                    return Err(AuthError::MissingCredentials {
                        auth_type: "basic",
                        env_vars: vec![
                            format!("{prefix}_{USERNAME_SUFFIX}"),
                            format!("{prefix}_{PASSWORD_SUFFIX}"),
                        ],
                    }
                    .into());
                };
                Authenticator::basic(username, password)
            }
            other => {
                return Err(ConfigError::InvalidAuthType {
                    value: other.to_string(),
                }
                .into())
            }
        };

        authenticator.validate()?;

        Ok(Self {
            url: var(URL_SUFFIX),
            authenticator,
            instance_id: var(INSTANCE_ID_SUFFIX),
        })
    }
}
