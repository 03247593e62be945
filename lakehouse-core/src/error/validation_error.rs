//! Response decoding errors.

use bytes::Bytes;
use thiserror::Error;

/// Errors during response body decoding.
///
/// Decode failures keep the raw response around: the server did answer,
/// so callers can still inspect the status and the body that failed to
/// decode.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// JSON decoding failed on an otherwise successful response.
    #[error("JSON decode error (HTTP {status}): {source}")]
    JsonParse {
        /// The HTTP status code of the response that failed to decode.
        status: u16,
        /// The underlying serde error.
        source: serde_json::Error,
        /// The raw response body, kept for inspection.
        body: Bytes,
    },

    /// Empty response body when content was expected.
    #[error("Empty response body (HTTP {status})")]
    EmptyBody {
        /// The HTTP status code of the empty response.
        status: u16,
    },
}

impl ValidationError {
    /// Returns the HTTP status code of the response that failed to decode.
    pub fn status(&self) -> u16 {
        match self {
            Self::JsonParse { status, .. } | Self::EmptyBody { status } => *status,
        }
    }

    /// Returns the raw response body, if one was captured.
    pub fn raw_body(&self) -> Option<&Bytes> {
        match self {
            Self::JsonParse { body, .. } => Some(body),
            Self::EmptyBody { .. } => None,
        }
    }
}
