//! Error types for the Category client.

use crate::framework::CollectionError;
use crate::transport::TransportError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CategoryError {
    #[error("{0}")]
    ValidationError(String),

    #[error("Category not found: {0}")]
    NotFound(String),

    #[error("Category {0} is still being saved")]
    Busy(String),

    #[error("Session expired, please log in again")]
    Unauthorized,

    #[error("Category request failed: {0}")]
    Request(TransportError),

    /// The category was deleted but its skills could not be reloaded.
    #[error("Skills could not be refreshed: {0}")]
    SkillsStale(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<CollectionError> for CategoryError {
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
