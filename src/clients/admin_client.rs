use crate::framework::{
    CollectionClient, CollectionState, CollectionStatus, Direction, RemoteEntity,
};
use async_trait::async_trait;
use tokio::sync::watch;

/// Trait for resource-specific clients to inherit the standard collection operations.
///
/// Implementors only provide [`inner`](AdminClient::inner) and an error type that can be
/// built from [`CollectionError`](crate::framework::CollectionError); load, fetch,
/// delete, reorder and the snapshot reads come for free.
#[async_trait]
pub trait AdminClient<T: RemoteEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: From<crate::framework::CollectionError> + Send + Sync;

    /// Access the inner generic CollectionClient.
    fn inner(&self) -> &CollectionClient<T>;

    /// Replace the cached list with the server's.
    #[tracing::instrument(skip(self))]
    async fn load(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().load().await.map_err(Self::Error::from)
    }

    /// Refresh one entry from the server.
    #[tracing::instrument(skip(self))]
    async fn fetch(&self, id: T::Id) -> Result<T, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().fetch(id).await.map_err(Self::Error::from)
    }

    /// Delete an entity by ID. The entry stays listed until the server confirms.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::Error::from)
    }

    /// Local-only move; undone by the next load.
    #[tracing::instrument(skip(self))]
    async fn reorder(&self, id: T::Id, direction: Direction) -> Result<usize, Self::Error> {
        self.inner()
            .reorder(id, direction)
            .await
            .map_err(Self::Error::from)
    }

    fn items(&self) -> Vec<T> {
        self.inner().items()
    }

    fn get(&self, id: &T::Id) -> Option<T> {
        self.inner().get(id)
    }

    fn status(&self) -> CollectionStatus {
        self.inner().status()
    }

    fn snapshot(&self) -> CollectionState<T> {
        self.inner().snapshot()
    }

    fn subscribe(&self) -> watch::Receiver<CollectionState<T>> {
        self.inner().subscribe()
    }
}
