//! Types and helpers shared across endpoint bindings.

use lakehouse_core::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Operation outcome reported by mutating endpoints.
///
/// The service attaches this object (as the `response` field) to most
/// create/update payloads, and returns it alone for action endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    /// Human-readable outcome message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Machine-readable outcome code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_code: Option<String>,
}

/// Response body that carries only a [`SuccessResponse`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessEnvelope {
    /// The operation outcome.
    pub response: SuccessResponse,
}

/// Fails with [`ConfigError::MissingField`] when a required string field
/// is unset or blank. Runs before any network I/O.
pub(crate) fn require(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::missing_field(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_accepts_non_empty() {
        assert!(require("bucket_id", "warehouse").is_ok());
    }

    #[test]
    fn test_require_rejects_empty_and_blank() {
        assert!(matches!(
            require("bucket_id", ""),
            Err(ConfigError::MissingField { field: "bucket_id" })
        ));
        assert!(require("bucket_id", "   ").is_err());
    }

    #[test]
    fn test_success_response_decodes() {
        let body = r#"{"message": "created", "message_code": "success"}"#;
        let decoded: SuccessResponse = serde_json::from_str(body).unwrap();
        assert_eq!(decoded.message.as_deref(), Some("created"));
        assert_eq!(decoded.message_code.as_deref(), Some("success"));
    }
}
