//! # Collection Messages
//!
//! Requests sent from a [`CollectionClient`](crate::framework::CollectionClient) to its
//! [`CollectionActor`](crate::framework::CollectionActor), and the settlements the actor
//! feeds back to itself when a spawned network call completes.

use crate::framework::entity::RemoteEntity;
use crate::framework::error::CollectionError;
use crate::framework::state::{Direction, OperationId};
use crate::transport::TransportError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<Result<T, CollectionError>>;

/// Request sent to a collection actor.
///
/// The CRUD variants mirror the REST endpoint family of the resource. `Reorder` is
/// local-only and `Teardown` stops the actor, discarding any result still in flight.
#[derive(Debug)]
pub enum CollectionRequest<T: RemoteEntity> {
    Load {
        respond_to: Response<Vec<T>>,
    },
    Fetch {
        id: T::Id,
        respond_to: Response<T>,
    },
    /// Responds with `None` when the server did not echo the entity and a reload was
    /// started instead.
    Create {
        fields: T::Fields,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        fields: T::Fields,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T>,
    },
    /// Responds with the new index of the entry.
    Reorder {
        id: T::Id,
        direction: Direction,
        respond_to: Response<usize>,
    },
    Teardown {
        respond_to: oneshot::Sender<()>,
    },
}

/// Outcome of a spawned network call, routed back into the actor loop.
pub(crate) enum Settlement<T: RemoteEntity> {
    Loaded {
        generation: u64,
        result: Result<Vec<T>, TransportError>,
        respond_to: Option<Response<Vec<T>>>,
    },
    Fetched {
        id: T::Id,
        result: Result<Option<T>, TransportError>,
        respond_to: Response<T>,
    },
    Created {
        op: OperationId,
        result: Result<Option<T>, TransportError>,
        respond_to: Response<Option<T>>,
    },
    Updated {
        op: OperationId,
        previous: T,
        fields: T::Fields,
        result: Result<Option<T>, TransportError>,
        respond_to: Response<T>,
    },
    Deleted {
        op: OperationId,
        id: T::Id,
        result: Result<(), TransportError>,
        respond_to: Response<()>,
    },
    Acted {
        op: OperationId,
        previous: T,
        action: T::Action,
        result: Result<Option<T>, TransportError>,
        respond_to: Response<T>,
    },
}
