//! # Collection Errors
//!
//! Error types shared by every collection actor and client. Validation, NotFound and
//! Conflict are detected inside the actor before any network call; transport failures
//! are reported once the request settles.

use crate::transport::TransportError;

/// A payload failed required-field validation.
///
/// The message is user-facing and is sent to the feedback channel as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Errors returned by [`CollectionClient`](crate::framework::CollectionClient) operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CollectionError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("Operation already in progress for {0}; wait for it to finish")]
    Conflict(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Collection closed")]
    Closed,

    #[error("Collection dropped response channel")]
    Dropped,
}

impl CollectionError {
    /// True when the backend rejected the session (HTTP 401).
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Transport(TransportError::Unauthorized))
    }

    /// True for errors raised before any request was sent.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::NotFound(_) | Self::Conflict(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_displays_user_message() {
        let err = ValidationError::new("title", "Please fill in all required fields");
        assert_eq!(err.to_string(), "Please fill in all required fields");
        let wrapped = CollectionError::from(err);
        assert!(wrapped.is_local());
    }

    #[test]
    fn transport_errors_are_not_local() {
        let err = CollectionError::from(TransportError::Unauthorized);
        assert!(err.is_unauthorized());
        assert!(!err.is_local());
    }
}
