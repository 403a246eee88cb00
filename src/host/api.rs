//! Public API for the host runtime surface
//!
//! This module provides the complete public API for the host-provided
//! capabilities this add-on consumes. External modules should import from
//! here rather than directly from internal modules.

// Priority tiers
pub use crate::host::priority::EventPriority;

// Dispatch tables
pub use crate::host::handler::{HandlerList, ListenerRegistration, SharedHandlerList};

// Type registry and name resolution
pub use crate::host::types::{
    HandlerListAccessor, SharedTypeRegistry, TypeDescriptor, TypeRegistry,
    DEFAULT_EVENT_NAMESPACE,
};

// Extension registry
pub use crate::host::extension::{Extension, ExtensionRegistry, SharedExtensionRegistry};

// Lifecycle events
pub use crate::host::lifecycle::{
    ExtensionEvent, ExtensionEventType, LifecycleListener, LifecycleNotifier,
    SharedLifecycleNotifier,
};

// Command dispatch surface
pub use crate::host::command::{CommandSender, ConsoleSender};

// Error handling
pub use crate::host::error::{HostError, HostResult};
