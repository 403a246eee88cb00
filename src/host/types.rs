//! Type registry
//!
//! Lookup-by-name registry of the host's known types. Event types carry an
//! accessor for their dispatch table; non-event types and events without a
//! table are registered too so that misdeclared configuration entries can be
//! told apart from unknown names.

use crate::host::handler::SharedHandlerList;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Namespace tried first when resolving a bare event-type name
pub const DEFAULT_EVENT_NAMESPACE: &str = "runtime::event";

type AccessorFn = Arc<dyn Fn() -> Result<SharedHandlerList, String> + Send + Sync>;

/// Accessor producing the dispatch-table handle of one event type
///
/// Invocation can fail; the host may refuse to lend a table out while the
/// type is being torn down or rebuilt.
#[derive(Clone)]
pub struct HandlerListAccessor {
    accessor: AccessorFn,
}

impl HandlerListAccessor {
    /// Accessor that always lends out the given table
    pub fn lending(list: SharedHandlerList) -> Self {
        Self {
            accessor: Arc::new(move || Ok(list.clone())),
        }
    }

    /// Accessor backed by an arbitrary lookup
    pub fn from_fn<F>(accessor: F) -> Self
    where
        F: Fn() -> Result<SharedHandlerList, String> + Send + Sync + 'static,
    {
        Self {
            accessor: Arc::new(accessor),
        }
    }

    pub fn invoke(&self) -> Result<SharedHandlerList, String> {
        (self.accessor)()
    }
}

impl std::fmt::Debug for HandlerListAccessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("HandlerListAccessor")
    }
}

/// One registered type name and what it refers to
#[derive(Clone, Debug)]
pub struct TypeDescriptor {
    name: String,
    is_event: bool,
    accessor: Option<HandlerListAccessor>,
}

impl TypeDescriptor {
    /// A listenable event type with its dispatch table
    pub fn event(name: &str, list: SharedHandlerList) -> Self {
        Self {
            name: name.to_string(),
            is_event: true,
            accessor: Some(HandlerListAccessor::lending(list)),
        }
    }

    /// An event type with a custom (possibly failing) table accessor
    pub fn event_with_accessor(name: &str, accessor: HandlerListAccessor) -> Self {
        Self {
            name: name.to_string(),
            is_event: true,
            accessor: Some(accessor),
        }
    }

    /// An event type that exposes no dispatch table and cannot be listened for
    pub fn event_without_handlers(name: &str) -> Self {
        Self {
            name: name.to_string(),
            is_event: true,
            accessor: None,
        }
    }

    /// A known type that is not an event type at all
    pub fn other(name: &str) -> Self {
        Self {
            name: name.to_string(),
            is_event: false,
            accessor: None,
        }
    }

    /// Fully-qualified type name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_event(&self) -> bool {
        self.is_event
    }

    pub fn handler_list_accessor(&self) -> Option<&HandlerListAccessor> {
        self.accessor.as_ref()
    }
}

/// Registry of fully-qualified type names
pub struct TypeRegistry {
    types: HashMap<String, TypeDescriptor>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self {
            types: HashMap::new(),
        }
    }

    /// Register a type descriptor under its fully-qualified name
    pub fn register(&mut self, descriptor: TypeDescriptor) {
        if let Some(previous) = self
            .types
            .insert(descriptor.name().to_string(), descriptor)
        {
            log::warn!("Type '{}' replaced an existing registration", previous.name());
        }
    }

    /// Look up a type by its exact fully-qualified name
    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types.get(name)
    }

    /// Resolve a configuration-supplied name
    ///
    /// Tries the default event namespace first, then the literal name as
    /// given; first hit wins.
    pub fn resolve(&self, name: &str) -> Option<&TypeDescriptor> {
        let prefixed = format!("{DEFAULT_EVENT_NAMESPACE}::{name}");
        self.types.get(&prefixed).or_else(|| self.types.get(name))
    }

    /// Sorted list of registered type names
    pub fn type_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.types.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe shared type registry
#[derive(Clone)]
pub struct SharedTypeRegistry {
    inner: Arc<RwLock<TypeRegistry>>,
}

impl SharedTypeRegistry {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(TypeRegistry::new())),
        }
    }

    /// Get access to the inner registry for read/write operations
    pub fn inner(&self) -> &Arc<RwLock<TypeRegistry>> {
        &self.inner
    }

    /// Convenience method to register a type descriptor
    pub async fn register(&self, descriptor: TypeDescriptor) {
        let mut registry = self.inner.write().await;
        registry.register(descriptor);
    }

    /// Convenience method to resolve a configuration name to a descriptor
    pub async fn resolve(&self, name: &str) -> Option<TypeDescriptor> {
        let registry = self.inner.read().await;
        registry.resolve(name).cloned()
    }

    /// Convenience method to get the registered type count
    pub async fn type_count(&self) -> usize {
        let registry = self.inner.read().await;
        registry.type_count()
    }
}

impl Default for SharedTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
