//! Error types for the Contact client.

use crate::framework::CollectionError;
use crate::transport::TransportError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ContactError {
    #[error("{0}")]
    ValidationError(String),

    #[error("Message not found: {0}")]
    NotFound(String),

    #[error("Message {0} is still being updated")]
    Busy(String),

    #[error("Session expired, please log in again")]
    Unauthorized,

    #[error("Contact request failed: {0}")]
    Request(TransportError),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<CollectionError> for ContactError {
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
