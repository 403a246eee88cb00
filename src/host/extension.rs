//! Extension Registry
//!
//! Tracks which extensions the host has loaded and which of those are
//! currently enabled. Registration and enablement are separate states: a
//! loaded extension only becomes live once the host enables it.

use crate::host::error::{HostError, HostResult};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

/// A loaded unit of host-runtime functionality
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Extension {
    name: String,
    version: String,
}

impl Extension {
    pub fn new(name: &str, version: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

/// Registry of loaded extensions and their enabled state
pub struct ExtensionRegistry {
    /// Map of extension name to extension instance
    extensions: HashMap<String, Extension>,

    /// Set of extension names that are currently enabled
    enabled: HashSet<String>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self {
            extensions: HashMap::new(),
            enabled: HashSet::new(),
        }
    }

    /// Register a loaded extension
    pub fn register(&mut self, extension: Extension) -> HostResult<()> {
        let name = extension.name().to_string();
        if self.extensions.contains_key(&name) {
            return Err(HostError::ExtensionAlreadyRegistered { name });
        }
        self.extensions.insert(name, extension);
        Ok(())
    }

    /// Remove an extension from the registry
    pub fn unregister(&mut self, name: &str) -> HostResult<()> {
        if self.extensions.remove(name).is_none() {
            return Err(HostError::ExtensionNotFound {
                name: name.to_string(),
            });
        }
        self.enabled.remove(name);
        Ok(())
    }

    /// Get a loaded extension by name, enabled or not
    pub fn get(&self, name: &str) -> Option<&Extension> {
        self.extensions.get(name)
    }

    /// Get a live extension: loaded and currently enabled
    pub fn get_enabled(&self, name: &str) -> Option<&Extension> {
        if self.enabled.contains(name) {
            self.extensions.get(name)
        } else {
            None
        }
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.enabled.contains(name)
    }

    /// Mark an extension as enabled
    pub fn enable(&mut self, name: &str) -> HostResult<()> {
        if !self.extensions.contains_key(name) {
            return Err(HostError::ExtensionNotFound {
                name: name.to_string(),
            });
        }
        self.enabled.insert(name.to_string());
        Ok(())
    }

    /// Mark an extension as disabled
    pub fn disable(&mut self, name: &str) -> HostResult<()> {
        if !self.extensions.contains_key(name) {
            return Err(HostError::ExtensionNotFound {
                name: name.to_string(),
            });
        }
        self.enabled.remove(name);
        Ok(())
    }

    /// Sorted names of all loaded extensions
    pub fn extension_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.extensions.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn extension_count(&self) -> usize {
        self.extensions.len()
    }
}

impl Default for ExtensionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe shared extension registry
#[derive(Clone)]
pub struct SharedExtensionRegistry {
    inner: Arc<RwLock<ExtensionRegistry>>,
}

impl SharedExtensionRegistry {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(ExtensionRegistry::new())),
        }
    }

    /// Get access to the inner registry for read/write operations
    pub fn inner(&self) -> &Arc<RwLock<ExtensionRegistry>> {
        &self.inner
    }

    /// Convenience method to register a loaded extension
    pub async fn register(&self, extension: Extension) -> HostResult<()> {
        let mut registry = self.inner.write().await;
        registry.register(extension)
    }

    /// Convenience method to check whether an extension is live
    pub async fn is_enabled(&self, name: &str) -> bool {
        let registry = self.inner.read().await;
        registry.is_enabled(name)
    }

    /// Convenience method to enable an extension
    pub async fn enable(&self, name: &str) -> HostResult<()> {
        let mut registry = self.inner.write().await;
        registry.enable(name)
    }

    /// Convenience method to disable an extension
    pub async fn disable(&self, name: &str) -> HostResult<()> {
        let mut registry = self.inner.write().await;
        registry.disable(name)
    }

    /// Convenience method to get a live extension by name
    pub async fn get_enabled(&self, name: &str) -> Option<Extension> {
        let registry = self.inner.read().await;
        registry.get_enabled(name).cloned()
    }

    /// Convenience method to get extension names
    pub async fn extension_names(&self) -> Vec<String> {
        let registry = self.inner.read().await;
        registry.extension_names()
    }
}

impl Default for SharedExtensionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
