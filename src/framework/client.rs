//! # Collection Client
//!
//! The handle consumers use to talk to a [`CollectionActor`](crate::framework::CollectionActor).

use crate::framework::entity::RemoteEntity;
use crate::framework::error::CollectionError;
use crate::framework::message::CollectionRequest;
use crate::framework::state::{CollectionState, CollectionStatus, Direction};
use tokio::sync::{mpsc, oneshot, watch};

/// ## CollectionClient
///
/// A type-safe, async API for one cached collection. Mutations are forwarded over a Tokio
/// mpsc channel and resolve through oneshot channels; reads come from the latest published
/// [`CollectionState`] and never wait on the actor.
///
/// Cloning is cheap: a sender and a watch receiver.
#[derive(Clone)]
pub struct CollectionClient<T: RemoteEntity> {
    sender: mpsc::Sender<CollectionRequest<T>>,
    state: watch::Receiver<CollectionState<T>>,
}

impl<T: RemoteEntity> CollectionClient<T> {
    pub fn new(
        sender: mpsc::Sender<CollectionRequest<T>>,
        state: watch::Receiver<CollectionState<T>>,
    ) -> Self {
        Self { sender, state }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, CollectionError>>) -> CollectionRequest<T>,
    ) -> Result<R, CollectionError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| CollectionError::Closed)?;
        response.await.map_err(|_| CollectionError::Dropped)?
    }

    /// Replace the cached collection with the server's list.
    pub async fn load(&self) -> Result<Vec<T>, CollectionError> {
        self.request(|respond_to| CollectionRequest::Load { respond_to })
            .await
    }

    /// Refresh a single entry from `GET /{resource}/{id}`.
    pub async fn fetch(&self, id: T::Id) -> Result<T, CollectionError> {
        self.request(|respond_to| CollectionRequest::Fetch { id, respond_to })
            .await
    }

    /// `Ok(None)` means the server accepted the create without echoing the entity; a
    /// reload has been started to pick it up.
    pub async fn create(&self, fields: T::Fields) -> Result<Option<T>, CollectionError> {
        self.request(|respond_to| CollectionRequest::Create { fields, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, fields: T::Fields) -> Result<T, CollectionError> {
        self.request(|respond_to| CollectionRequest::Update {
            id,
            fields,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), CollectionError> {
        self.request(|respond_to| CollectionRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(&self, id: T::Id, action: T::Action) -> Result<T, CollectionError> {
        self.request(|respond_to| CollectionRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }

    /// Move an entry one position. Returns its new index.
    pub async fn reorder(&self, id: T::Id, direction: Direction) -> Result<usize, CollectionError> {
        self.request(|respond_to| CollectionRequest::Reorder {
            id,
            direction,
            respond_to,
        })
        .await
    }

    /// Stop the actor. Results of requests still in flight are discarded.
    pub async fn teardown(&self) -> Result<(), CollectionError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CollectionRequest::Teardown { respond_to })
            .await
            .map_err(|_| CollectionError::Closed)?;
        response.await.map_err(|_| CollectionError::Dropped)
    }

    /// Latest published state.
    pub fn snapshot(&self) -> CollectionState<T> {
        self.state.borrow().clone()
    }

    pub fn items(&self) -> Vec<T> {
        self.state.borrow().items.clone()
    }

    pub fn get(&self, id: &T::Id) -> Option<T> {
        self.state.borrow().get(id).cloned()
    }

    pub fn status(&self) -> CollectionStatus {
        self.state.borrow().status
    }

    /// Watch for state changes.
    pub fn subscribe(&self) -> watch::Receiver<CollectionState<T>> {
        self.state.clone()
    }
}
