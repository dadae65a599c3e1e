//! # Transport Layer
//!
//! The seam between a collection actor and the remote resource endpoint. Production
//! code uses [`RestTransport`]; tests use the mocks in [`crate::framework::mock`].
//!
//! Every method corresponds to one HTTP call on the resource's endpoint family:
//!
//! | Method | HTTP |
//! |--------|------|
//! | `list` | `GET /{resource}` |
//! | `fetch` | `GET /{resource}/{id}` (`None` on 404) |
//! | `create` | `POST /{resource}` |
//! | `update` | `PUT /{resource}/{id}` |
//! | `delete` | `DELETE /{resource}/{id}` |
//! | `action` | `PUT /{resource}/{id}/{action}` |
//!
//! `create`, `update` and `action` return `None` when the endpoint answers with an
//! empty or non-JSON body.

pub mod rest;

pub use rest::RestTransport;

use crate::framework::RemoteEntity;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Errors raised while talking to the backend.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransportError {
    /// The request never produced an HTTP response.
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    /// Non-2xx response. `message` is the server-provided message when there is one.
    #[error("{message}")]
    Server {
        status: u16,
        message: String,
        errors: BTreeMap<String, String>,
    },

    /// HTTP 401: the session token was rejected and has been invalidated.
    #[error("Session expired, please log in again")]
    Unauthorized,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl TransportError {
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
            errors: BTreeMap::new(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// A file attached to a multipart request.
#[derive(Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for FileUpload {
    // Never dump file contents into logs.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Multipart form: text fields (repeatable keys) plus optional file parts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartBody {
    pub fields: Vec<(String, String)>,
    pub files: Vec<(String, FileUpload)>,
}

impl MultipartBody {
    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.push((name.to_string(), value.into()));
        self
    }

    pub fn file(mut self, name: &str, file: FileUpload) -> Self {
        self.files.push((name.to_string(), file));
        self
    }
}

/// Body of a create or update request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(serde_json::Value),
    Multipart(MultipartBody),
}

/// Remote endpoint family for one resource type.
#[async_trait]
pub trait Transport<T: RemoteEntity>: Send + Sync + 'static {
    async fn list(&self) -> Result<Vec<T>, TransportError>;

    async fn fetch(&self, id: &T::Id) -> Result<Option<T>, TransportError>;

    async fn create(&self, fields: &T::Fields) -> Result<Option<T>, TransportError>;

    async fn update(&self, id: &T::Id, fields: &T::Fields) -> Result<Option<T>, TransportError>;

    async fn delete(&self, id: &T::Id) -> Result<(), TransportError>;

    async fn action(&self, id: &T::Id, action: &T::Action) -> Result<Option<T>, TransportError>;
}
