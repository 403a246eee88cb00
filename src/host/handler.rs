//! Dispatch tables
//!
//! Each event type owns one ordered list of listener registrations. The host
//! dispatches an event by walking the baked snapshot of that list; everything
//! here is bookkeeping around that snapshot.

use crate::host::error::{HostError, HostResult};
use crate::host::priority::EventPriority;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

static NEXT_LISTENER_ID: AtomicU64 = AtomicU64::new(1);

/// One listener registration within a dispatch table
///
/// Identity is the handle itself: the host hands out `Arc<ListenerRegistration>`
/// and every later operation (unregister, reinsert) refers to that same handle.
#[derive(Debug)]
pub struct ListenerRegistration {
    id: u64,
    owner: String,
    priority: EventPriority,
}

impl ListenerRegistration {
    pub(crate) fn new(owner: &str, priority: EventPriority) -> Arc<Self> {
        Arc::new(Self {
            id: NEXT_LISTENER_ID.fetch_add(1, Ordering::Relaxed),
            owner: owner.to_string(),
            priority,
        })
    }

    /// Process-unique registration id
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Name of the extension that owns this registration
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn priority(&self) -> EventPriority {
        self.priority
    }
}

/// Ordered listener registrations for one event type
pub struct HandlerList {
    event_name: String,
    entries: Vec<Arc<ListenerRegistration>>,
    /// Priority-ordered dispatch snapshot; invalidated by any mutation
    baked: Option<Vec<Arc<ListenerRegistration>>>,
    sealed: bool,
}

impl std::fmt::Debug for HandlerList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerList")
            .field("event_name", &self.event_name)
            .field("entries", &self.entries.len())
            .field("baked", &self.baked.is_some())
            .field("sealed", &self.sealed)
            .finish()
    }
}

impl HandlerList {
    pub fn new(event_name: &str) -> Self {
        Self {
            event_name: event_name.to_string(),
            entries: Vec::new(),
            baked: None,
            sealed: false,
        }
    }

    /// Fully-qualified name of the event type this table belongs to
    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    /// Register a new listener for an extension at the given tier
    pub fn register(
        &mut self,
        owner: &str,
        priority: EventPriority,
    ) -> HostResult<Arc<ListenerRegistration>> {
        if self.sealed {
            return Err(HostError::HandlerListSealed {
                event: self.event_name.clone(),
            });
        }
        let listener = ListenerRegistration::new(owner, priority);
        self.entries.push(listener.clone());
        self.baked = None;
        Ok(listener)
    }

    /// Re-insert a previously removed registration handle
    pub fn reinsert(&mut self, listener: Arc<ListenerRegistration>) -> HostResult<()> {
        if self.sealed {
            return Err(HostError::HandlerListSealed {
                event: self.event_name.clone(),
            });
        }
        if self.contains(&listener) {
            return Err(HostError::AlreadyRegistered {
                listener_id: listener.id(),
                event: self.event_name.clone(),
            });
        }
        self.entries.push(listener);
        self.baked = None;
        Ok(())
    }

    /// Remove a registration from this table
    pub fn unregister(&mut self, listener: &Arc<ListenerRegistration>) -> HostResult<()> {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id() != listener.id());
        if self.entries.len() == before {
            return Err(HostError::NotRegistered {
                listener_id: listener.id(),
                event: self.event_name.clone(),
            });
        }
        self.baked = None;
        Ok(())
    }

    pub fn contains(&self, listener: &Arc<ListenerRegistration>) -> bool {
        self.entries.iter().any(|entry| entry.id() == listener.id())
    }

    /// Snapshot of current registrations in registration order
    pub fn registrations(&self) -> Vec<Arc<ListenerRegistration>> {
        self.entries.clone()
    }

    /// Rebuild the priority-ordered dispatch snapshot
    pub fn bake(&mut self) {
        let mut snapshot = self.entries.clone();
        snapshot.sort_by_key(|entry| entry.priority());
        self.baked = Some(snapshot);
    }

    /// The baked dispatch snapshot, if current
    pub fn baked_registrations(&self) -> Option<&[Arc<ListenerRegistration>]> {
        self.baked.as_deref()
    }

    /// Forbid further registration; the host uses this while tearing a type down
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Shared handle to one event type's dispatch table
///
/// This is the handle the host lends out through type-registry accessors.
/// Clones refer to the same underlying table.
#[derive(Clone, Debug)]
pub struct SharedHandlerList {
    inner: Arc<RwLock<HandlerList>>,
}

impl SharedHandlerList {
    pub fn new(event_name: &str) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HandlerList::new(event_name))),
        }
    }

    /// Get access to the inner table for read/write operations
    pub fn inner(&self) -> &Arc<RwLock<HandlerList>> {
        &self.inner
    }

    /// Whether two handles refer to the same underlying table
    pub fn same_table(&self, other: &SharedHandlerList) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub async fn event_name(&self) -> String {
        self.inner.read().await.event_name().to_string()
    }

    pub async fn register(
        &self,
        owner: &str,
        priority: EventPriority,
    ) -> HostResult<Arc<ListenerRegistration>> {
        self.inner.write().await.register(owner, priority)
    }

    pub async fn reinsert(&self, listener: Arc<ListenerRegistration>) -> HostResult<()> {
        self.inner.write().await.reinsert(listener)
    }

    pub async fn unregister(&self, listener: &Arc<ListenerRegistration>) -> HostResult<()> {
        self.inner.write().await.unregister(listener)
    }

    pub async fn registrations(&self) -> Vec<Arc<ListenerRegistration>> {
        self.inner.read().await.registrations()
    }

    pub async fn bake(&self) {
        self.inner.write().await.bake()
    }

    pub async fn seal(&self) {
        self.inner.write().await.seal()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}
