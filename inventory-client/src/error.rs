//! Client error types

use shared::ValidationError;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connect, timeout, body decoding)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Server rejected the submission
    #[error("Validation error: {0}")]
    Validation(String),

    /// Any other non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Local file error (snapshot, image file)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Fields failed local checks before submission
    #[error("{0}")]
    Invalid(#[from] ValidationError),
}

/// Coarse failure classes surfaced to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Connect error or non-success response
    Network,
    /// Submission rejected as invalid
    Validation,
}

impl ClientError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ClientError::Invalid(_) | ClientError::Validation(_) => FailureKind::Validation,
            _ => FailureKind::Network,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        assert_eq!(
            ClientError::Invalid(ValidationError::EmptyName).kind(),
            FailureKind::Validation
        );
        assert_eq!(
            ClientError::Validation("bad price".into()).kind(),
            FailureKind::Validation
        );
        assert_eq!(ClientError::NotFound("x".into()).kind(), FailureKind::Network);
        assert_eq!(
            ClientError::Api {
                status: 502,
                message: "bad gateway".into()
            }
            .kind(),
            FailureKind::Network
        );
    }
}
