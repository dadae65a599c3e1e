//! # RemoteEntity Trait
//!
//! The `RemoteEntity` trait defines the contract that every admin resource (Project,
//! Skill, Category, Experience, ContactMessage) implements to be managed by the generic
//! [`CollectionActor`](crate::framework::CollectionActor). It names the REST resource,
//! the typed field payload used by create/update, the optional custom actions, and
//! how a body-less update is merged locally.
//!
//! # Architecture Note
//! The entity never owns its `id`: the remote authority assigns it and the actor only
//! ever stores entities that came back from the server (or provisional merges of them).
//! Field payloads are their own type (`Fields`) so that a `Skill` payload cannot be
//! sent to the `projects` endpoint.

use crate::framework::error::ValidationError;
use crate::transport::RequestBody;
use serde::de::DeserializeOwned;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Typed payload for create and update requests.
pub trait EntityFields: Clone + Debug + Send + Sync + 'static {
    /// Minimal required-field validation, run before any network call.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Wire representation: JSON, or multipart when a file is attached.
    fn to_body(&self) -> RequestBody;
}

/// A resource-specific remote operation beyond CRUD (e.g. marking a message as read).
///
/// Actions are sent as `PUT /{resource}/{id}/{path}`.
pub trait EntityAction: Clone + Debug + Send + Sync + 'static {
    /// Path segment appended to the entity URL.
    fn path(&self) -> &'static str;

    /// Imperative form used in failure messages ("mark as read").
    fn verb(&self) -> &'static str;

    /// Past tense used in success messages ("marked as read").
    fn past_tense(&self) -> &'static str;
}

/// Action type for resources without custom actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoAction {}

impl EntityAction for NoAction {
    fn path(&self) -> &'static str {
        match *self {}
    }

    fn verb(&self) -> &'static str {
        match *self {}
    }

    fn past_tense(&self) -> &'static str {
        match *self {}
    }
}

/// Trait that any remote resource must implement to be cached by a `CollectionActor`.
///
/// # Provided Methods
/// - [`RemoteEntity::apply_action`] defaults to an unchanged clone.
/// - [`RemoteEntity::created_message`] and friends produce the dashboard wording.
pub trait RemoteEntity: Clone + Debug + PartialEq + Send + Sync + DeserializeOwned + 'static {
    /// Identifier assigned by the server.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + 'static;

    /// Fields accepted by `POST /{resource}` and `PUT /{resource}/{id}`.
    type Fields: EntityFields;

    /// Custom actions; use [`NoAction`] when there are none.
    type Action: EntityAction;

    /// Endpoint segment, e.g. `"projects"`.
    const RESOURCE: &'static str;

    /// Human label used in notifications, e.g. `"Project"`.
    const LABEL: &'static str;

    fn id(&self) -> &Self::Id;

    /// Local copy of `self` with `fields` applied, used when an update returns no body.
    fn merge(&self, fields: &Self::Fields) -> Self;

    /// Local effect of an action, used when the action endpoint returns no body.
    fn apply_action(&self, _action: &Self::Action) -> Self {
        self.clone()
    }

    fn created_message() -> String {
        format!("{} created successfully!", Self::LABEL)
    }

    fn updated_message() -> String {
        format!("{} updated successfully!", Self::LABEL)
    }

    fn deleted_message() -> String {
        format!("{} deleted successfully!", Self::LABEL)
    }
}
