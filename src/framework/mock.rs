//! # Mock Transports
//!
//! Utilities for testing collections without a backend.
//!
//! - [`MockTransport`] answers from a queue of scripted expectations and checks that
//!   they were all consumed.
//! - [`create_mock_transport`] hands every call to the test as a [`TransportRequest`],
//!   so the test decides when (and whether) each call settles. Use helpers like
//!   [`expect_update`] to pull the next request off the receiver.

use crate::framework::entity::RemoteEntity;
use crate::transport::{Transport, TransportError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Expectation<T: RemoteEntity> {
    List {
        response: Result<Vec<T>, TransportError>,
    },
    Fetch {
        id: T::Id,
        response: Result<Option<T>, TransportError>,
    },
    Create {
        response: Result<Option<T>, TransportError>,
    },
    Update {
        id: T::Id,
        response: Result<Option<T>, TransportError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), TransportError>,
    },
    Action {
        id: T::Id,
        response: Result<Option<T>, TransportError>,
    },
}

impl<T: RemoteEntity> Expectation<T> {
    fn describe(&self) -> String {
        match self {
            Self::List { .. } => "list".to_string(),
            Self::Fetch { id, .. } => format!("fetch({})", id),
            Self::Create { .. } => "create".to_string(),
            Self::Update { id, .. } => format!("update({})", id),
            Self::Delete { id, .. } => format!("delete({})", id),
            Self::Action { id, .. } => format!("action({})", id),
        }
    }
}

struct Shared<T: RemoteEntity> {
    expectations: Mutex<VecDeque<Expectation<T>>>,
    mismatches: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

fn lock<V>(mutex: &Mutex<V>) -> MutexGuard<'_, V> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A scripted transport with expectation tracking.
///
/// Calls are answered in the order expectations were added. A call that does not match
/// the next expectation fails with [`TransportError::InvalidResponse`] and is reported by
/// [`verify`](Self::verify), since panicking inside the actor's spawned task would go
/// unnoticed.
///
/// # Example
/// ```ignore
/// let mut mock = MockTransport::<Skill>::new();
/// mock.expect_list().return_ok(vec![skill]);
/// mock.expect_delete(id).return_err(TransportError::server(500, "boom"));
///
/// let (actor, client) = CollectionActor::<Skill>::new(10);
/// tokio::spawn(actor.run(CollectionContext::new(mock.transport(), feedback)));
/// // ...
/// mock.verify();
/// ```
pub struct MockTransport<T: RemoteEntity> {
    shared: Arc<Shared<T>>,
}

impl<T: RemoteEntity> Clone for MockTransport<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: RemoteEntity> Default for MockTransport<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: RemoteEntity> MockTransport<T> {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                expectations: Mutex::new(VecDeque::new()),
                mismatches: Mutex::new(Vec::new()),
                calls: AtomicUsize::new(0),
            }),
        }
    }

    /// The transport to inject into a [`CollectionContext`](crate::framework::CollectionContext).
    pub fn transport(&self) -> Arc<dyn Transport<T>> {
        Arc::new(self.clone())
    }

    /// Number of calls received so far, matched or not.
    pub fn call_count(&self) -> usize {
        self.shared.calls.load(Ordering::SeqCst)
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(|response| Expectation::List { response })
    }

    pub fn expect_fetch(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |response| Expectation::Fetch { id, response })
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, Option<T>> {
        self.builder(|response| Expectation::Create { response })
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |response| Expectation::Update { id, response })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(move |response| Expectation::Delete { id, response })
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |response| Expectation::Action { id, response })
    }

    /// Verifies that all expectations were met and no unexpected call arrived.
    pub fn verify(&self) {
        let mismatches = lock(&self.shared.mismatches);
        if !mismatches.is_empty() {
            panic!("Unexpected transport calls: {:?}", *mismatches);
        }
        let remaining: Vec<String> = lock(&self.shared.expectations)
            .iter()
            .map(Expectation::describe)
            .collect();
        if !remaining.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining: {:?}",
                remaining.len(),
                remaining
            );
        }
    }

    fn builder<R>(
        &mut self,
        make: impl FnOnce(Result<R, TransportError>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            shared: Arc::clone(&self.shared),
            make: Box::new(make),
        }
    }

    fn next(&self, call: String) -> Result<Expectation<T>, TransportError> {
        self.shared.calls.fetch_add(1, Ordering::SeqCst);
        match lock(&self.shared.expectations).pop_front() {
            Some(expectation) => Ok(expectation),
            None => Err(self.mismatch(format!("{} (nothing expected)", call))),
        }
    }

    fn mismatch(&self, message: String) -> TransportError {
        lock(&self.shared.mismatches).push(message.clone());
        TransportError::InvalidResponse(format!("unexpected call: {}", message))
    }

    fn check_id(&self, call: &str, expected: &T::Id, actual: &T::Id) -> Result<(), TransportError> {
        if expected == actual {
            Ok(())
        } else {
            Err(self.mismatch(format!("{}({}), expected id {}", call, actual, expected)))
        }
    }
}

/// Builder returned by the `expect_*` methods.
pub struct ExpectationBuilder<T: RemoteEntity, R> {
    shared: Arc<Shared<T>>,
    make: Box<dyn FnOnce(Result<R, TransportError>) -> Expectation<T> + Send>,
}

impl<T: RemoteEntity, R> ExpectationBuilder<T, R> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        lock(&self.shared.expectations).push_back((self.make)(Ok(value)));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: TransportError) {
        lock(&self.shared.expectations).push_back((self.make)(Err(error)));
    }
}

#[async_trait]
impl<T: RemoteEntity> Transport<T> for MockTransport<T> {
    async fn list(&self) -> Result<Vec<T>, TransportError> {
        match self.next("list".to_string())? {
            Expectation::List { response } => response,
            other => Err(self.mismatch(format!("list, expected {}", other.describe()))),
        }
    }

    async fn fetch(&self, id: &T::Id) -> Result<Option<T>, TransportError> {
        match self.next(format!("fetch({})", id))? {
            Expectation::Fetch { id: expected, response } => {
                self.check_id("fetch", &expected, id)?;
                response
            }
            other => Err(self.mismatch(format!("fetch({}), expected {}", id, other.describe()))),
        }
    }

    async fn create(&self, _fields: &T::Fields) -> Result<Option<T>, TransportError> {
        match self.next("create".to_string())? {
            Expectation::Create { response } => response,
            other => Err(self.mismatch(format!("create, expected {}", other.describe()))),
        }
    }

    async fn update(&self, id: &T::Id, _fields: &T::Fields) -> Result<Option<T>, TransportError> {
        match self.next(format!("update({})", id))? {
            Expectation::Update { id: expected, response } => {
                self.check_id("update", &expected, id)?;
                response
            }
            other => Err(self.mismatch(format!("update({}), expected {}", id, other.describe()))),
        }
    }

    async fn delete(&self, id: &T::Id) -> Result<(), TransportError> {
        match self.next(format!("delete({})", id))? {
            Expectation::Delete { id: expected, response } => {
                self.check_id("delete", &expected, id)?;
                response
            }
            other => Err(self.mismatch(format!("delete({}), expected {}", id, other.describe()))),
        }
    }

    async fn action(&self, id: &T::Id, _action: &T::Action) -> Result<Option<T>, TransportError> {
        match self.next(format!("action({})", id))? {
            Expectation::Action { id: expected, response } => {
                self.check_id("action", &expected, id)?;
                response
            }
            other => Err(self.mismatch(format!("action({}), expected {}", id, other.describe()))),
        }
    }
}

// =============================================================================
// CHANNEL TRANSPORT
// =============================================================================

/// Sender half used to settle a [`TransportRequest`].
pub type Responder<R> = oneshot::Sender<Result<R, TransportError>>;

/// A transport call captured by [`create_mock_transport`].
#[derive(Debug)]
pub enum TransportRequest<T: RemoteEntity> {
    List {
        respond_to: Responder<Vec<T>>,
    },
    Fetch {
        id: T::Id,
        respond_to: Responder<Option<T>>,
    },
    Create {
        fields: T::Fields,
        respond_to: Responder<Option<T>>,
    },
    Update {
        id: T::Id,
        fields: T::Fields,
        respond_to: Responder<Option<T>>,
    },
    Delete {
        id: T::Id,
        respond_to: Responder<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Responder<Option<T>>,
    },
}

struct ChannelTransport<T: RemoteEntity> {
    sender: mpsc::Sender<TransportRequest<T>>,
}

impl<T: RemoteEntity> ChannelTransport<T> {
    async fn call<R>(
        &self,
        build: impl FnOnce(Responder<R>) -> TransportRequest<T>,
    ) -> Result<R, TransportError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| TransportError::Network("mock transport closed".to_string()))?;
        response
            .await
            .map_err(|_| TransportError::Network("mock responder dropped".to_string()))?
    }
}

#[async_trait]
impl<T: RemoteEntity> Transport<T> for ChannelTransport<T> {
    async fn list(&self) -> Result<Vec<T>, TransportError> {
        self.call(|respond_to| TransportRequest::List { respond_to })
            .await
    }

    async fn fetch(&self, id: &T::Id) -> Result<Option<T>, TransportError> {
        let id = id.clone();
        self.call(|respond_to| TransportRequest::Fetch { id, respond_to })
            .await
    }

    async fn create(&self, fields: &T::Fields) -> Result<Option<T>, TransportError> {
        let fields = fields.clone();
        self.call(|respond_to| TransportRequest::Create { fields, respond_to })
            .await
    }

    async fn update(&self, id: &T::Id, fields: &T::Fields) -> Result<Option<T>, TransportError> {
        let (id, fields) = (id.clone(), fields.clone());
        self.call(|respond_to| TransportRequest::Update {
            id,
            fields,
            respond_to,
        })
        .await
    }

    async fn delete(&self, id: &T::Id) -> Result<(), TransportError> {
        let id = id.clone();
        self.call(|respond_to| TransportRequest::Delete { id, respond_to })
            .await
    }

    async fn action(&self, id: &T::Id, action: &T::Action) -> Result<Option<T>, TransportError> {
        let (id, action) = (id.clone(), action.clone());
        self.call(|respond_to| TransportRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }
}

/// Creates a transport whose calls are delivered to the returned receiver.
///
/// # Testing Strategy
/// Each call stays open until the test sends on its responder, which makes interleavings
/// deterministic: issue two mutations, settle the second first, then the first. Dropping
/// a responder fails the call with [`TransportError::Network`].
pub fn create_mock_transport<T: RemoteEntity>(
    buffer_size: usize,
) -> (Arc<dyn Transport<T>>, mpsc::Receiver<TransportRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (Arc::new(ChannelTransport { sender }), receiver)
}

/// Helper to verify that the next call is a `list`.
pub async fn expect_list<T: RemoteEntity>(
    receiver: &mut mpsc::Receiver<TransportRequest<T>>,
) -> Option<Responder<Vec<T>>> {
    match receiver.recv().await {
        Some(TransportRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next call is a `fetch`.
pub async fn expect_fetch<T: RemoteEntity>(
    receiver: &mut mpsc::Receiver<TransportRequest<T>>,
) -> Option<(T::Id, Responder<Option<T>>)> {
    match receiver.recv().await {
        Some(TransportRequest::Fetch { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next call is a `create`.
pub async fn expect_create<T: RemoteEntity>(
    receiver: &mut mpsc::Receiver<TransportRequest<T>>,
) -> Option<(T::Fields, Responder<Option<T>>)> {
    match receiver.recv().await {
        Some(TransportRequest::Create { fields, respond_to }) => Some((fields, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next call is an `update`.
pub async fn expect_update<T: RemoteEntity>(
    receiver: &mut mpsc::Receiver<TransportRequest<T>>,
) -> Option<(T::Id, T::Fields, Responder<Option<T>>)> {
    match receiver.recv().await {
        Some(TransportRequest::Update {
            id,
            fields,
            respond_to,
        }) => Some((id, fields, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next call is a `delete`.
pub async fn expect_delete<T: RemoteEntity>(
    receiver: &mut mpsc::Receiver<TransportRequest<T>>,
) -> Option<(T::Id, Responder<()>)> {
    match receiver.recv().await {
        Some(TransportRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next call is an `action`.
pub async fn expect_action<T: RemoteEntity>(
    receiver: &mut mpsc::Receiver<TransportRequest<T>>,
) -> Option<(T::Id, T::Action, Responder<Option<T>>)> {
    match receiver.recv().await {
        Some(TransportRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}
