//! Error types for the Experience client.

use crate::framework::CollectionError;
use crate::transport::TransportError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ExperienceError {
    #[error("{0}")]
    ValidationError(String),

    #[error("Experience not found: {0}")]
    NotFound(String),

    #[error("Experience {0} is still being saved")]
    Busy(String),

    #[error("Session expired, please log in again")]
    Unauthorized,

    #[error("Experience request failed: {0}")]
    Request(TransportError),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<CollectionError> for ExperienceError {
    fn from(e: CollectionError) -> Self {
        match e {
            CollectionError::Validation(v) => Self::ValidationError(v.message),
            CollectionError::NotFound(id) => Self::NotFound(id),
            CollectionError::Conflict(id) => Self::Busy(id),
            CollectionError::Transport(TransportError::Unauthorized) => Self::Unauthorized,
            CollectionError::Transport(t) => Self::Request(t),
            other => Self::ActorCommunicationError(other.to_string()),
        }
    }
}
