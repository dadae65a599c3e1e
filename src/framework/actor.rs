//! # Collection Actor
//!
//! This module defines the `CollectionActor`, the component that owns the client-side
//! cache of one resource type and keeps it consistent with the remote endpoint. It
//! implements the "Server" side of the Actor Model: requests are processed
//! sequentially, and the state is never shared mutably.
//!
//! Network calls are not awaited inside the loop. Each call is spawned as its own task
//! and its outcome comes back to the loop as a [`Settlement`], so a slow update on one
//! entry never blocks a delete on another.

use crate::framework::client::CollectionClient;
use crate::framework::entity::{EntityAction, EntityFields, RemoteEntity};
use crate::framework::error::{CollectionError, ValidationError};
use crate::framework::feedback::Feedback;
use crate::framework::message::{CollectionRequest, Response, Settlement};
use crate::framework::state::{
    CollectionState, CollectionStatus, Direction, MutationKind, OperationId, PendingOperation,
    PendingTarget,
};
use crate::transport::{Transport, TransportError};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// Caller-supplied validator that replaces [`EntityFields::validate`].
pub type Validator<F> = Arc<dyn Fn(&F) -> Result<(), ValidationError> + Send + Sync>;

/// Dependencies injected into [`CollectionActor::run`].
///
/// Late binding: the actor and its client are created first, the transport and the
/// feedback channel are wired in when the loop starts.
pub struct CollectionContext<T: RemoteEntity> {
    pub transport: Arc<dyn Transport<T>>,
    pub feedback: Feedback,
}

impl<T: RemoteEntity> CollectionContext<T> {
    pub fn new(transport: Arc<dyn Transport<T>>, feedback: Feedback) -> Self {
        Self {
            transport,
            feedback,
        }
    }
}

/// The actor that manages the cached collection of one resource type.
///
/// # Operations
///
/// * **Load**: marks the collection `Loading`, fetches `GET /{resource}` and replaces
///   `items` wholesale on success. On failure `items` stays as it was.
/// * **Create**: validates, tracks a pending create under a temporary id, then appends
///   the entity the server echoes back, or reloads when it echoes nothing.
/// * **Update / Action**: requires the id to be cached and idle; replaces the entry with
///   the server representation, or with a provisional local merge.
/// * **Delete**: requires the id to be cached and idle; removes the entry only once the
///   server confirms.
/// * **Reorder**: local swap with the neighbouring entry; never sent to the server.
///
/// Every settled mutation sends exactly one notification to the feedback channel.
pub struct CollectionActor<T: RemoteEntity> {
    receiver: mpsc::Receiver<CollectionRequest<T>>,
    settled_tx: mpsc::UnboundedSender<Settlement<T>>,
    settled_rx: mpsc::UnboundedReceiver<Settlement<T>>,
    state: CollectionState<T>,
    publisher: watch::Sender<CollectionState<T>>,
    next_op: u64,
    load_generation: u64,
    validator: Option<Validator<T::Fields>>,
    timeout: Option<Duration>,
}

impl<T: RemoteEntity> CollectionActor<T> {
    /// Creates a new `CollectionActor` and its associated `CollectionClient`.
    ///
    /// `buffer_size` is the capacity of the request channel; callers wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, CollectionClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (settled_tx, settled_rx) = mpsc::unbounded_channel();
        let (publisher, watcher) = watch::channel(CollectionState::default());
        let actor = Self {
            receiver,
            settled_tx,
            settled_rx,
            state: CollectionState::default(),
            publisher,
            next_op: 1,
            load_generation: 0,
            validator: None,
            timeout: None,
        };
        let client = CollectionClient::new(sender, watcher);
        (actor, client)
    }

    /// Replace the per-resource field validation.
    pub fn with_validator(
        mut self,
        validator: impl Fn(&T::Fields) -> Result<(), ValidationError> + Send + Sync + 'static,
    ) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Fail any network call that takes longer than `limit`.
    pub fn with_timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    /// Runs the actor's event loop until every client is dropped or a teardown arrives.
    ///
    /// Settlements that arrive after the loop exits are discarded: the spawned call may
    /// still complete on the server, but `items` is never touched again.
    pub async fn run(mut self, context: CollectionContext<T>) {
        let resource = T::RESOURCE;
        info!(resource, "Collection started");

        loop {
            tokio::select! {
                request = self.receiver.recv() => match request {
                    Some(CollectionRequest::Teardown { respond_to }) => {
                        debug!(resource, "Teardown");
                        let _ = respond_to.send(());
                        break;
                    }
                    Some(request) => self.handle_request(request, &context),
                    None => break,
                },
                Some(settlement) = self.settled_rx.recv() => {
                    self.handle_settlement(settlement, &context);
                }
            }
        }

        info!(
            resource,
            size = self.state.items.len(),
            in_flight = self.state.pending.len(),
            "Shutdown"
        );
    }

    fn handle_request(&mut self, request: CollectionRequest<T>, ctx: &CollectionContext<T>) {
        let resource = T::RESOURCE;
        match request {
            CollectionRequest::Load { respond_to } => {
                debug!(resource, "Load");
                self.start_load(Some(respond_to), ctx);
            }
            CollectionRequest::Fetch { id, respond_to } => {
                debug!(resource, %id, "Fetch");
                let transport = Arc::clone(&ctx.transport);
                let limit = self.timeout;
                self.spawn_settlement(async move {
                    let result = with_timeout(limit, transport.fetch(&id)).await;
                    Settlement::Fetched {
                        id,
                        result,
                        respond_to,
                    }
                });
            }
            CollectionRequest::Create { fields, respond_to } => {
                debug!(resource, ?fields, "Create");
                if let Err(e) = self.validate(&fields) {
                    self.reject(ctx, CollectionError::Validation(e), respond_to);
                    return;
                }
                let op = self.begin(MutationKind::Create, None);
                let transport = Arc::clone(&ctx.transport);
                let limit = self.timeout;
                self.spawn_settlement(async move {
                    let result = with_timeout(limit, transport.create(&fields)).await;
                    Settlement::Created {
                        op,
                        result,
                        respond_to,
                    }
                });
            }
            CollectionRequest::Update {
                id,
                fields,
                respond_to,
            } => {
                debug!(resource, %id, ?fields, "Update");
                let previous = match self.claim(&id) {
                    Ok(previous) => previous,
                    Err(e) => return self.reject(ctx, e, respond_to),
                };
                if let Err(e) = self.validate(&fields) {
                    self.reject(ctx, CollectionError::Validation(e), respond_to);
                    return;
                }
                let op = self.begin(MutationKind::Update, Some(id.clone()));
                let transport = Arc::clone(&ctx.transport);
                let limit = self.timeout;
                self.spawn_settlement(async move {
                    let result = with_timeout(limit, transport.update(&id, &fields)).await;
                    Settlement::Updated {
                        op,
                        previous,
                        fields,
                        result,
                        respond_to,
                    }
                });
            }
            CollectionRequest::Delete { id, respond_to } => {
                debug!(resource, %id, "Delete");
                if let Err(e) = self.claim(&id) {
                    return self.reject(ctx, e, respond_to);
                }
                let op = self.begin(MutationKind::Delete, Some(id.clone()));
                let transport = Arc::clone(&ctx.transport);
                let limit = self.timeout;
                self.spawn_settlement(async move {
                    let result = with_timeout(limit, transport.delete(&id)).await;
                    Settlement::Deleted {
                        op,
                        id,
                        result,
                        respond_to,
                    }
                });
            }
            CollectionRequest::Action {
                id,
                action,
                respond_to,
            } => {
                debug!(resource, %id, ?action, "Action");
                let previous = match self.claim(&id) {
                    Ok(previous) => previous,
                    Err(e) => return self.reject(ctx, e, respond_to),
                };
                let op = self.begin(MutationKind::Action, Some(id.clone()));
                let transport = Arc::clone(&ctx.transport);
                let limit = self.timeout;
                self.spawn_settlement(async move {
                    let result = with_timeout(limit, transport.action(&id, &action)).await;
                    Settlement::Acted {
                        op,
                        previous,
                        action,
                        result,
                        respond_to,
                    }
                });
            }
            CollectionRequest::Reorder {
                id,
                direction,
                respond_to,
            } => {
                debug!(resource, %id, ?direction, "Reorder");
                let Some(pos) = self.state.position(&id) else {
                    let e = CollectionError::NotFound(id.to_string());
                    return self.reject(ctx, e, respond_to);
                };
                let target = match direction {
                    Direction::Up => pos.saturating_sub(1),
                    Direction::Down => (pos + 1).min(self.state.items.len() - 1),
                };
                self.state.items.swap(pos, target);
                self.publish();
                ctx.feedback.info(
                    resource,
                    "Reordering is local only; it needs a position field on the server to persist.",
                );
                let _ = respond_to.send(Ok(target));
            }
            CollectionRequest::Teardown { respond_to } => {
                // Handled by the loop; kept exhaustive for direct callers.
                let _ = respond_to.send(());
            }
        }
    }

    fn handle_settlement(&mut self, settlement: Settlement<T>, ctx: &CollectionContext<T>) {
        let resource = T::RESOURCE;
        let label = T::LABEL.to_lowercase();
        match settlement {
            Settlement::Loaded {
                generation,
                result,
                respond_to,
            } => {
                if generation != self.load_generation {
                    debug!(resource, generation, "Superseded load discarded");
                    if let Err(e) = &result {
                        ctx.feedback
                            .error(resource, load_failure(resource, e, respond_to.is_none()));
                    }
                    if let Some(respond_to) = respond_to {
                        let _ = respond_to.send(result.map_err(CollectionError::from));
                    }
                    return;
                }
                match result {
                    Ok(items) => {
                        self.state.items = items.clone();
                        self.state.provisional.clear();
                        self.state.status = CollectionStatus::Ready;
                        self.state.last_error = None;
                        info!(resource, size = items.len(), "Loaded");
                        self.publish();
                        if let Some(respond_to) = respond_to {
                            let _ = respond_to.send(Ok(items));
                        }
                    }
                    Err(e) => {
                        warn!(resource, error = %e, "Load failed");
                        self.state.status = CollectionStatus::Error;
                        self.state.last_error = Some(e.to_string());
                        self.publish();
                        ctx.feedback
                            .error(resource, load_failure(resource, &e, respond_to.is_none()));
                        if let Some(respond_to) = respond_to {
                            let _ = respond_to.send(Err(e.into()));
                        }
                    }
                }
            }
            Settlement::Fetched {
                id,
                result,
                respond_to,
            } => match result {
                Ok(Some(entity)) => {
                    self.state.provisional.remove(entity.id());
                    self.state.upsert(entity.clone());
                    self.state.last_error = None;
                    self.publish();
                    let _ = respond_to.send(Ok(entity));
                }
                Ok(None) => {
                    warn!(resource, %id, "Not found on server");
                    let e = CollectionError::NotFound(id.to_string());
                    ctx.feedback
                        .error(resource, format!("{} not found: {}", T::LABEL, id));
                    let _ = respond_to.send(Err(e));
                }
                Err(e) => self.fail(ctx, format!("Failed to fetch {}", label), e, respond_to),
            },
            Settlement::Created {
                op,
                result,
                respond_to,
            } => {
                self.state.clear_pending(op);
                match result {
                    Ok(Some(entity)) => {
                        info!(resource, id = %entity.id(), size = self.state.items.len() + 1, "Created");
                        self.state.upsert(entity.clone());
                        self.state.last_error = None;
                        self.publish();
                        ctx.feedback.success(resource, T::created_message());
                        let _ = respond_to.send(Ok(Some(entity)));
                    }
                    Ok(None) => {
                        info!(resource, %op, "Created without echo; reconciling");
                        self.state.last_error = None;
                        ctx.feedback.success(resource, T::created_message());
                        let _ = respond_to.send(Ok(None));
                        self.start_load(None, ctx);
                    }
                    Err(e) => self.fail(ctx, format!("Failed to create {}", label), e, respond_to),
                }
            }
            Settlement::Updated {
                op,
                previous,
                fields,
                result,
                respond_to,
            } => {
                self.state.clear_pending(op);
                match result {
                    Ok(Some(entity)) => {
                        info!(resource, id = %entity.id(), "Updated");
                        self.replace(entity.clone(), false);
                        ctx.feedback.success(resource, T::updated_message());
                        let _ = respond_to.send(Ok(entity));
                    }
                    Ok(None) => {
                        let base = self.current_or(previous);
                        let merged = base.merge(&fields);
                        info!(resource, id = %merged.id(), "Updated (provisional merge)");
                        self.replace(merged.clone(), true);
                        ctx.feedback.success(resource, T::updated_message());
                        let _ = respond_to.send(Ok(merged));
                    }
                    Err(e) => self.fail(ctx, format!("Failed to update {}", label), e, respond_to),
                }
            }
            Settlement::Deleted {
                op,
                id,
                result,
                respond_to,
            } => {
                self.state.clear_pending(op);
                match result {
                    Ok(()) => {
                        self.state.items.retain(|item| item.id() != &id);
                        self.state.provisional.remove(&id);
                        self.state.last_error = None;
                        info!(resource, %id, size = self.state.items.len(), "Deleted");
                        self.publish();
                        ctx.feedback.success(resource, T::deleted_message());
                        let _ = respond_to.send(Ok(()));
                    }
                    Err(e) => self.fail(ctx, format!("Failed to delete {}", label), e, respond_to),
                }
            }
            Settlement::Acted {
                op,
                previous,
                action,
                result,
                respond_to,
            } => {
                self.state.clear_pending(op);
                match result {
                    Ok(entity) => {
                        let provisional = entity.is_none();
                        let entity = match entity {
                            Some(entity) => entity,
                            None => self.current_or(previous).apply_action(&action),
                        };
                        info!(resource, id = %entity.id(), ?action, "Action ok");
                        self.replace(entity.clone(), provisional);
                        ctx.feedback.success(
                            resource,
                            format!("{} {}!", T::LABEL, action.past_tense()),
                        );
                        let _ = respond_to.send(Ok(entity));
                    }
                    Err(e) => self.fail(
                        ctx,
                        format!("Failed to {} {}", action.verb(), label),
                        e,
                        respond_to,
                    ),
                }
            }
        }
    }

    fn start_load(&mut self, respond_to: Option<Response<Vec<T>>>, ctx: &CollectionContext<T>) {
        self.load_generation += 1;
        let generation = self.load_generation;
        self.state.status = CollectionStatus::Loading;
        self.publish();

        let transport = Arc::clone(&ctx.transport);
        let limit = self.timeout;
        self.spawn_settlement(async move {
            let result = with_timeout(limit, transport.list()).await;
            Settlement::Loaded {
                generation,
                result,
                respond_to,
            }
        });
    }

    fn validate(&self, fields: &T::Fields) -> Result<(), ValidationError> {
        match &self.validator {
            Some(validator) => validator(fields),
            None => fields.validate(),
        }
    }

    /// The cached entity for `id`, provided no other operation holds it.
    fn claim(&self, id: &T::Id) -> Result<T, CollectionError> {
        let Some(entity) = self.state.get(id) else {
            return Err(CollectionError::NotFound(id.to_string()));
        };
        if self.state.is_pending(id) {
            return Err(CollectionError::Conflict(id.to_string()));
        }
        Ok(entity.clone())
    }

    fn begin(&mut self, kind: MutationKind, id: Option<T::Id>) -> OperationId {
        let op = OperationId(self.next_op);
        self.next_op += 1;
        let target = match id {
            Some(id) => PendingTarget::Existing(id),
            None => PendingTarget::Temporary(op),
        };
        self.state.pending.push(PendingOperation { op, kind, target });
        self.publish();
        op
    }

    fn current_or(&self, previous: T) -> T {
        self.state.get(previous.id()).cloned().unwrap_or(previous)
    }

    /// Swap in a settled entity. A reload may have dropped the entry meanwhile; the
    /// server state from that reload wins and nothing is re-inserted.
    fn replace(&mut self, entity: T, provisional: bool) {
        let id = entity.id().clone();
        if let Some(pos) = self.state.position(&id) {
            self.state.items[pos] = entity;
            if provisional {
                self.state.provisional.insert(id);
            } else {
                self.state.provisional.remove(&id);
            }
        }
        self.state.last_error = None;
        self.publish();
    }

    /// Reject a request before any network call.
    fn reject<R>(&self, ctx: &CollectionContext<T>, error: CollectionError, respond_to: Response<R>) {
        let resource = T::RESOURCE;
        warn!(resource, error = %error, "Rejected");
        let message = match &error {
            CollectionError::Validation(e) => e.to_string(),
            CollectionError::NotFound(id) => format!("{} not found: {}", T::LABEL, id),
            CollectionError::Conflict(id) => format!(
                "{} {} is still being saved; please wait for it to finish",
                T::LABEL,
                id
            ),
            other => other.to_string(),
        };
        ctx.feedback.error(resource, message);
        let _ = respond_to.send(Err(error));
    }

    /// Record a failed network call. `items` is left exactly as it was.
    fn fail<R>(
        &mut self,
        ctx: &CollectionContext<T>,
        context: String,
        error: TransportError,
        respond_to: Response<R>,
    ) {
        let resource = T::RESOURCE;
        warn!(resource, error = %error, "{}", context);
        self.state.last_error = Some(error.to_string());
        self.publish();
        ctx.feedback.error(resource, format!("{}: {}", context, error));
        let _ = respond_to.send(Err(error.into()));
    }

    fn spawn_settlement<F>(&self, call: F)
    where
        F: Future<Output = Settlement<T>> + Send + 'static,
    {
        let settled = self.settled_tx.clone();
        tokio::spawn(async move {
            let settlement = call.await;
            if settled.send(settlement).is_err() {
                debug!(resource = T::RESOURCE, "Collection gone; settlement discarded");
            }
        });
    }

    fn publish(&self) {
        self.publisher.send_replace(self.state.clone());
    }
}

/// Notification text for a failed load. Reloads the actor starts itself, after a
/// create with no echo, read as a refresh.
fn load_failure(resource: &str, error: &TransportError, internal: bool) -> String {
    if internal {
        format!("Saved, but could not refresh {}: {}", resource, error)
    } else {
        format!("Failed to load {}: {}", resource, error)
    }
}

async fn with_timeout<R, F>(limit: Option<Duration>, call: F) -> Result<R, TransportError>
where
    F: Future<Output = Result<R, TransportError>>,
{
    match limit {
        Some(limit) => tokio::time::timeout(limit, call)
            .await
            .unwrap_or(Err(TransportError::Timeout)),
        None => call.await,
    }
}
