//! Extension lifecycle events
//!
//! The host announces extension enable/disable transitions through a
//! notifier. Delivery is synchronous and in attach order: the notifier
//! awaits each listener before moving to the next, and the host never
//! publishes concurrently with another callback.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::RwLock;

#[derive(Clone, Debug, PartialEq)]
pub enum ExtensionEventType {
    Enabled,
    Disabled,
}

/// One extension lifecycle transition
#[derive(Clone, Debug)]
pub struct ExtensionEvent {
    pub event_type: ExtensionEventType,
    pub timestamp: SystemTime,
    pub extension_name: String,
}

impl ExtensionEvent {
    pub fn new(event_type: ExtensionEventType, extension_name: String) -> Self {
        Self {
            event_type,
            timestamp: SystemTime::now(),
            extension_name,
        }
    }

    pub fn enabled(extension_name: &str) -> Self {
        Self::new(ExtensionEventType::Enabled, extension_name.to_string())
    }

    pub fn disabled(extension_name: &str) -> Self {
        Self::new(ExtensionEventType::Disabled, extension_name.to_string())
    }
}

/// Trait for lifecycle event listeners
#[async_trait]
pub trait LifecycleListener: Send + Sync {
    /// Handle an incoming lifecycle event
    async fn on_extension_event(&self, event: ExtensionEvent);

    /// Get the unique identifier for this listener
    fn listener_id(&self) -> &str;
}

struct AttachedListener {
    id: String,
    listener: Arc<dyn LifecycleListener>,
}

/// Fan-out point for extension lifecycle events
pub struct LifecycleNotifier {
    listeners: Vec<AttachedListener>,
}

impl LifecycleNotifier {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Attach a listener; a listener attached under an existing id replaces it
    pub fn attach(&mut self, listener: Arc<dyn LifecycleListener>) {
        let id = listener.listener_id().to_string();
        if let Some(slot) = self.listeners.iter_mut().find(|entry| entry.id == id) {
            log::warn!("Lifecycle listener '{}' replaced an existing attachment", id);
            slot.listener = listener;
        } else {
            self.listeners.push(AttachedListener { id, listener });
        }
    }

    /// Detach a listener by id
    pub fn detach(&mut self, id: &str) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|entry| entry.id != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn has_listener(&self, id: &str) -> bool {
        self.listeners.iter().any(|entry| entry.id == id)
    }

    fn snapshot(&self) -> Vec<Arc<dyn LifecycleListener>> {
        self.listeners
            .iter()
            .map(|entry| entry.listener.clone())
            .collect()
    }
}

impl Default for LifecycleNotifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe shared lifecycle notifier
#[derive(Clone)]
pub struct SharedLifecycleNotifier {
    inner: Arc<RwLock<LifecycleNotifier>>,
}

impl SharedLifecycleNotifier {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(LifecycleNotifier::new())),
        }
    }

    /// Convenience method to attach a listener
    pub async fn attach(&self, listener: Arc<dyn LifecycleListener>) {
        let mut notifier = self.inner.write().await;
        notifier.attach(listener);
    }

    /// Convenience method to detach a listener by id
    pub async fn detach(&self, id: &str) -> bool {
        let mut notifier = self.inner.write().await;
        notifier.detach(id)
    }

    /// Convenience method to get the attached listener count
    pub async fn listener_count(&self) -> usize {
        let notifier = self.inner.read().await;
        notifier.listener_count()
    }

    /// Deliver an event to every attached listener, in attach order
    ///
    /// Listeners are snapshotted before delivery so a listener may attach or
    /// detach others without deadlocking the notifier.
    pub async fn publish(&self, event: ExtensionEvent) {
        let listeners = {
            let notifier = self.inner.read().await;
            notifier.snapshot()
        };
        log::trace!(
            "Delivering {:?} event for '{}' to {} listener(s)",
            event.event_type,
            event.extension_name,
            listeners.len()
        );
        for listener in listeners {
            listener.on_extension_event(event.clone()).await;
        }
    }
}

impl Default for SharedLifecycleNotifier {
    fn default() -> Self {
        Self::new()
    }
}
