//! Common test utilities and helpers
//!
//! A miniature host: type registry, extension registry, lifecycle notifier
//! and a suppressor wired to a temp config file. Enable/disable helpers
//! mimic the host's ordering - an extension registers its listeners during
//! its enable phase, and the lifecycle event fires afterwards.

// Not every test binary uses every helper
#![allow(dead_code)]

use listenercontrol::host::api::{
    EventPriority, Extension, ExtensionEvent, SharedExtensionRegistry, SharedHandlerList,
    SharedLifecycleNotifier, SharedTypeRegistry, TypeDescriptor,
};
use listenercontrol::suppressor::api::ListenerSuppressor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct HostFixture {
    pub types: SharedTypeRegistry,
    pub extensions: SharedExtensionRegistry,
    pub notifier: SharedLifecycleNotifier,
    pub suppressor: Arc<ListenerSuppressor>,
    config_path: PathBuf,
    _config_dir: tempfile::TempDir,
}

impl HostFixture {
    /// Build a host with the suppressor installed and the given config on disk
    pub async fn new(config: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        std::fs::write(&config_path, config).unwrap();

        let types = SharedTypeRegistry::new();
        let extensions = SharedExtensionRegistry::new();
        let notifier = SharedLifecycleNotifier::new();
        let suppressor =
            ListenerSuppressor::new(types.clone(), extensions.clone(), config_path.clone());
        suppressor.install(&notifier).await;

        Self {
            types,
            extensions,
            notifier,
            suppressor,
            config_path,
            _config_dir: dir,
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Replace the config file contents
    pub fn write_config(&self, config: &str) {
        std::fs::write(&self.config_path, config).unwrap();
    }

    /// Register a listenable event type and return its dispatch table
    pub async fn register_event(&self, name: &str) -> SharedHandlerList {
        let list = SharedHandlerList::new(name);
        self.types
            .register(TypeDescriptor::event(name, list.clone()))
            .await;
        list
    }

    pub async fn load_extension(&self, name: &str) {
        self.extensions
            .register(Extension::new(name, "1.0.0"))
            .await
            .unwrap();
    }

    /// Enable an extension: mark it live, run its listener-registration
    /// phase, then announce the enable to lifecycle listeners
    pub async fn enable_extension(
        &self,
        name: &str,
        registrations: &[(&SharedHandlerList, EventPriority)],
    ) {
        self.extensions.enable(name).await.unwrap();
        for (list, priority) in registrations {
            list.register(name, *priority).await.unwrap();
        }
        self.notifier.publish(ExtensionEvent::enabled(name)).await;
    }

    /// Disable an extension: mark it dormant, tear its remaining
    /// registrations out of the given tables, then announce the disable
    pub async fn disable_extension(&self, name: &str, lists: &[&SharedHandlerList]) {
        self.extensions.disable(name).await.unwrap();
        for list in lists {
            for registration in list.registrations().await {
                if registration.owner() == name {
                    list.unregister(&registration).await.unwrap();
                }
            }
        }
        self.notifier.publish(ExtensionEvent::disabled(name)).await;
    }
}

/// Count registrations in a table owned by `owner` at `priority`
pub async fn owned_at(list: &SharedHandlerList, owner: &str, priority: EventPriority) -> usize {
    list.registrations()
        .await
        .iter()
        .filter(|registration| {
            registration.owner() == owner && registration.priority() == priority
        })
        .count()
}
