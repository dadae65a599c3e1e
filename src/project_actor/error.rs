//! Error types for the Project client.

use crate::framework::{CollectionError, ValidationError};
use crate::transport::TransportError;
use thiserror::Error;

/// Errors that can occur during project operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProjectError {
    /// The payload failed validation; nothing was sent.
    #[error("{0}")]
    Validation(ValidationError),

    #[error("Project not found: {0}")]
    NotFound(String),

    /// Another save or delete on the same project has not finished.
    #[error("Project {0} is still being saved")]
    Busy(String),

    #[error("Session expired, please log in again")]
    Unauthorized,

    #[error("Project request failed: {0}")]
    Request(TransportError),

    /// An error occurred while communicating with the collection actor.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<CollectionError> for ProjectError {
    fn from(e: CollectionError) -> Self {
        match e {
            CollectionError::Validation(v) => Self::Validation(v),
            CollectionError::NotFound(id) => Self::NotFound(id),
            CollectionError::Conflict(id) => Self::Busy(id),
            CollectionError::Transport(TransportError::Unauthorized) => Self::Unauthorized,
            CollectionError::Transport(t) => Self::Request(t),
            other => Self::ActorCommunicationError(other.to_string()),
        }
    }
}
