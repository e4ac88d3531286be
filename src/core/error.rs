//! Custom error types for the application.
//!
//! Provides structured error handling with meaningful error messages
//! and proper error categorization for each domain:
//!
//! - [`DecodeError`] - Token structure, encoding and JSON failures
//! - [`StorageError`] - Persistence failures (always swallowed by callers)

use thiserror::Error;

/// Reasons a token fails to decode.
///
/// All variants are recoverable: the session turns them into an invalid
/// status line and keeps running.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Not exactly three non-empty dot-separated segments
    #[error("malformed structure: {0}")]
    MalformedStructure(String),
    /// Segment is not valid base64url
    #[error("invalid encoding in {segment}: {reason}")]
    InvalidEncoding {
        segment: &'static str,
        reason: String,
    },
    /// Segment does not decode to a JSON object
    #[error("invalid JSON in {segment}: {reason}")]
    InvalidJson {
        segment: &'static str,
        reason: String,
    },
}

/// Persistence errors for key/value storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Backing store not available (e.g. localStorage disabled).
    #[error("storage not available")]
    Unavailable,
    /// Failed to serialize data to JSON.
    #[error("failed to serialize: {0}")]
    SerializationFailed(String),
    /// Failed to write to storage.
    #[error("failed to write {0}")]
    WriteFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_messages() {
        assert_eq!(
            DecodeError::MalformedStructure("expected 3 segments, found 1".into()).to_string(),
            "malformed structure: expected 3 segments, found 1"
        );
        assert_eq!(
            DecodeError::InvalidEncoding {
                segment: "header",
                reason: "bad byte".into()
            }
            .to_string(),
            "invalid encoding in header: bad byte"
        );
        assert_eq!(
            DecodeError::InvalidJson {
                segment: "payload",
                reason: "not an object".into()
            }
            .to_string(),
            "invalid JSON in payload: not an object"
        );
    }

    #[test]
    fn test_storage_error_messages() {
        assert_eq!(StorageError::Unavailable.to_string(), "storage not available");
        assert_eq!(
            StorageError::WriteFailed("decodeHistory".into()).to_string(),
            "failed to write decodeHistory"
        );
    }
}
