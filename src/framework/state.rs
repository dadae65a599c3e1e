//! # Collection State
//!
//! The working set a collection actor owns for one resource type, and the read-only
//! snapshot consumers observe through [`CollectionClient::subscribe`](crate::framework::CollectionClient::subscribe).

use crate::framework::entity::RemoteEntity;
use std::collections::HashSet;
use std::fmt;

/// Load status of a collection: `Idle → Loading → {Ready, Error}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollectionStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Error,
}

/// Identifier of one in-flight operation, unique per actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OperationId(pub u64);

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "op_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
    Action,
}

/// What a pending operation targets. Creates have no server id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingTarget<Id> {
    Existing(Id),
    Temporary(OperationId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingOperation<Id> {
    pub op: OperationId,
    pub kind: MutationKind,
    pub target: PendingTarget<Id>,
}

/// Direction for the local-only [`reorder`](crate::framework::CollectionClient::reorder).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Snapshot of one collection.
///
/// `items` is the last known server state in server order, except for entries listed
/// in `provisional` (local merges after a body-less update) and local reorders. Both
/// are replaced by the next successful load.
#[derive(Debug, Clone)]
pub struct CollectionState<T: RemoteEntity> {
    pub items: Vec<T>,
    pub status: CollectionStatus,
    pub pending: Vec<PendingOperation<T::Id>>,
    pub provisional: HashSet<T::Id>,
    pub last_error: Option<String>,
}

impl<T: RemoteEntity> Default for CollectionState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            status: CollectionStatus::Idle,
            pending: Vec::new(),
            provisional: HashSet::new(),
            last_error: None,
        }
    }
}

impl<T: RemoteEntity> CollectionState<T> {
    pub fn position(&self, id: &T::Id) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.position(id).is_some()
    }

    /// True if an update, delete or action on `id` has not settled yet.
    pub fn is_pending(&self, id: &T::Id) -> bool {
        self.pending
            .iter()
            .any(|p| matches!(&p.target, PendingTarget::Existing(target) if target == id))
    }

    pub fn is_provisional(&self, id: &T::Id) -> bool {
        self.provisional.contains(id)
    }

    /// Number of creates still waiting for the server.
    pub fn pending_creates(&self) -> usize {
        self.pending
            .iter()
            .filter(|p| p.kind == MutationKind::Create)
            .count()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn clear_pending(&mut self, op: OperationId) {
        self.pending.retain(|p| p.op != op);
    }

    /// Replace the entry with the same id, or append it.
    pub(crate) fn upsert(&mut self, entity: T) {
        match self.position(entity.id()) {
            Some(pos) => self.items[pos] = entity,
            None => self.items.push(entity),
        }
    }
}
