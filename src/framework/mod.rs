//! Generic collection framework for remote admin resources.
//!
//! This module provides the building blocks for keeping a client-side cache of a REST
//! resource consistent with its server while mutations run concurrently.
//!
//! # Main Components
//!
//! - [`RemoteEntity`] - Trait that resource types implement to be cached by an actor
//! - [`CollectionActor`] - Generic actor that owns one collection and serializes its mutations
//! - [`CollectionClient`] - Type-safe handle for sending requests and reading snapshots
//! - [`CollectionError`] / [`ValidationError`] - Error taxonomy
//! - [`Feedback`] - User-visible notification channel
//!
//! # Testing
//!
//! See the [`mock`] module for scripted and channel-driven transports.

pub mod actor;
pub mod client;
pub mod entity;
pub mod error;
pub mod feedback;
pub mod message;
pub mod mock;
pub mod state;

pub use actor::{CollectionActor, CollectionContext, Validator};
pub use client::CollectionClient;
pub use entity::{EntityAction, EntityFields, NoAction, RemoteEntity};
pub use error::{CollectionError, ValidationError};
pub use feedback::{feedback_channel, Feedback, Notification, NotificationLevel, Notifications};
pub use message::{CollectionRequest, Response};
pub use state::{
    CollectionState, CollectionStatus, Direction, MutationKind, OperationId, PendingOperation,
    PendingTarget,
};
