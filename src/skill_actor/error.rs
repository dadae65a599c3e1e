//! Error types for the Skill client.

use crate::framework::CollectionError;
use crate::transport::TransportError;
use thiserror::Error;

/// Errors that can occur during skill operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SkillError {
    #[error("{0}")]
    ValidationError(String),

    #[error("Skill not found: {0}")]
    NotFound(String),

    #[error("Skill {0} is still being saved")]
    Busy(String),

    #[error("Session expired, please log in again")]
    Unauthorized,

    #[error("Skill request failed: {0}")]
    Request(TransportError),

    /// An error occurred while communicating with the collection actor.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<CollectionError> for SkillError {
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
