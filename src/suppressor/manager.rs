//! Listener suppression manager
//!
//! Owns the two retained maps (active suppressions and removed
//! registrations) and the reload pipeline: restore everything previously
//! removed, clear, re-parse the config, and enforce each declared rule
//! against the host's live dispatch tables. Every failure along the way
//! degrades to "this one rule has no effect" - nothing aborts a reload.

use crate::host::api::{
    EventPriority, ExtensionEvent, ExtensionEventType, LifecycleListener, ListenerRegistration,
    SharedExtensionRegistry, SharedHandlerList, SharedLifecycleNotifier, SharedTypeRegistry,
};
use crate::suppressor::config::{SuppressionConfig, SuppressionRule};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Id this component attaches to the lifecycle notifier under
pub const LIFECYCLE_LISTENER_ID: &str = "listenercontrol";

/// One rule currently enforced against an extension
///
/// Kept keyed by extension name so freshly (re-)registered listeners can be
/// suppressed again when that extension next enables.
#[derive(Clone, Debug)]
pub struct ActiveSuppression {
    /// Fully-qualified name of the resolved event type
    pub event_name: String,
    pub priority: EventPriority,
    pub handler_list: SharedHandlerList,
}

/// A registration pulled out of a dispatch table, retained for restoration
#[derive(Clone, Debug)]
pub struct RemovedRegistration {
    pub listener: Arc<ListenerRegistration>,
    pub event_name: String,
    pub priority: EventPriority,
    pub handler_list: SharedHandlerList,
}

#[derive(Default)]
struct SuppressorState {
    /// Extension name -> rules enforced against it; rebuilt on every reload
    active: HashMap<String, Vec<ActiveSuppression>>,

    /// Registrations currently held out of their tables; rebuilt on every reload
    removed: Vec<RemovedRegistration>,
}

/// The Listener Suppressor component
///
/// The host serializes lifecycle callbacks and command dispatch, so the
/// state sits behind a single mutex with no further coordination.
pub struct ListenerSuppressor {
    types: SharedTypeRegistry,
    extensions: SharedExtensionRegistry,
    config_path: PathBuf,
    state: Mutex<SuppressorState>,
}

impl ListenerSuppressor {
    /// Create a suppressor bound to the host registries and its config file
    pub fn new(
        types: SharedTypeRegistry,
        extensions: SharedExtensionRegistry,
        config_path: impl Into<PathBuf>,
    ) -> Arc<Self> {
        Arc::new(Self {
            types,
            extensions,
            config_path: config_path.into(),
            state: Mutex::new(SuppressorState::default()),
        })
    }

    /// Attach to the host's lifecycle notifier
    pub async fn install(self: &Arc<Self>, notifier: &SharedLifecycleNotifier) {
        notifier.attach(self.clone()).await;
        log::debug!("Listener suppressor attached to lifecycle notifier");
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Reload the suppression configuration and enforce it
    ///
    /// Re-entrant; runs the full restore -> clear -> re-parse -> apply
    /// pipeline on every call.
    pub async fn load_config(&self) {
        let mut state = self.state.lock().await;

        Self::restore_removed(&mut state).await;
        state.active.clear();

        let config = match SuppressionConfig::load_or_default(&self.config_path).await {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}", e);
                SuppressionConfig::default()
            }
        };

        for rule in config.rules() {
            self.apply_rule(&mut state, rule).await;
        }
    }

    /// Put every previously removed registration back into its table
    async fn restore_removed(state: &mut SuppressorState) {
        for entry in state.removed.drain(..) {
            match entry.handler_list.reinsert(entry.listener.clone()).await {
                Ok(()) => {
                    entry.handler_list.bake().await;
                    log::info!(
                        "Re-registered {} {} listener of {}",
                        entry.event_name,
                        entry.priority,
                        entry.listener.owner()
                    );
                }
                // Best effort: a sealed or otherwise rejecting table costs
                // only this one restoration
                Err(e) => log::warn!("{}", e),
            }
        }
    }

    /// Enforce one declared rule, skipping on any resolution failure
    async fn apply_rule(&self, state: &mut SuppressorState, rule: &SuppressionRule) {
        let descriptor = match self.types.resolve(&rule.event_name).await {
            Some(descriptor) => descriptor,
            None => {
                log::warn!("Event type '{}' not found!", rule.event_name);
                return;
            }
        };

        if !descriptor.is_event() {
            log::warn!("Type '{}' is not an event type!", descriptor.name());
            return;
        }

        let accessor = match descriptor.handler_list_accessor() {
            Some(accessor) => accessor,
            None => {
                log::warn!(
                    "Event '{}' can not be listened for! (it exposes no handler list)",
                    descriptor.name()
                );
                return;
            }
        };

        let handler_list = match accessor.invoke() {
            Ok(handler_list) => handler_list,
            Err(cause) => {
                log::error!(
                    "Could not get handler list of event '{}'! {}",
                    descriptor.name(),
                    cause
                );
                return;
            }
        };

        // Nothing to remove from a dormant extension, but the rule still
        // arms so it fires when the extension next enables
        if self.extensions.is_enabled(&rule.extension).await {
            Self::suppress_matching(
                state,
                &rule.extension,
                &handler_list,
                rule.priority,
                descriptor.name(),
            )
            .await;
        }

        state
            .active
            .entry(rule.extension.clone())
            .or_default()
            .push(ActiveSuppression {
                event_name: descriptor.name().to_string(),
                priority: rule.priority,
                handler_list,
            });
    }

    /// Remove every registration in the table owned by `extension` at
    /// `priority`, retaining each for later restoration
    async fn suppress_matching(
        state: &mut SuppressorState,
        extension: &str,
        handler_list: &SharedHandlerList,
        priority: EventPriority,
        event_name: &str,
    ) {
        let mut removed_any = false;
        for listener in handler_list.registrations().await {
            if listener.owner() != extension || listener.priority() != priority {
                continue;
            }
            match handler_list.unregister(&listener).await {
                Ok(()) => {
                    log::info!(
                        "Unregistered {} {} listener of {}",
                        event_name,
                        priority,
                        extension
                    );
                    state.removed.push(RemovedRegistration {
                        listener,
                        event_name: event_name.to_string(),
                        priority,
                        handler_list: handler_list.clone(),
                    });
                    removed_any = true;
                }
                Err(e) => log::warn!("{}", e),
            }
        }
        if removed_any {
            handler_list.bake().await;
        }
    }

    async fn handle_extension_enabled(&self, extension: &str) {
        let mut state = self.state.lock().await;
        let suppressions: Vec<ActiveSuppression> = state
            .active
            .get(extension)
            .map(|entries| entries.to_vec())
            .unwrap_or_default();

        for suppression in suppressions {
            Self::suppress_matching(
                &mut state,
                extension,
                &suppression.handler_list,
                suppression.priority,
                &suppression.event_name,
            )
            .await;
        }
    }

    /// Drop retained registrations of a disabling extension without
    /// re-inserting them; the handles are no longer valid to restore.
    /// The extension's active suppressions are deliberately kept.
    async fn handle_extension_disabled(&self, extension: &str) {
        let mut state = self.state.lock().await;
        let before = state.removed.len();
        state
            .removed
            .retain(|entry| entry.listener.owner() != extension);
        let dropped = before - state.removed.len();
        if dropped > 0 {
            log::debug!(
                "Dropped {} retained registration(s) of disabling extension {}",
                dropped,
                extension
            );
        }
    }

    /// Snapshot of the registrations currently held out of their tables
    pub async fn removed_registrations(&self) -> Vec<RemovedRegistration> {
        let state = self.state.lock().await;
        state.removed.clone()
    }

    pub async fn removed_count(&self) -> usize {
        let state = self.state.lock().await;
        state.removed.len()
    }

    /// Rules currently enforced against one extension
    pub async fn active_suppressions_for(&self, extension: &str) -> Vec<ActiveSuppression> {
        let state = self.state.lock().await;
        state
            .active
            .get(extension)
            .map(|entries| entries.to_vec())
            .unwrap_or_default()
    }

    /// Sorted names of extensions with at least one enforced rule
    pub async fn suppressed_extensions(&self) -> Vec<String> {
        let state = self.state.lock().await;
        let mut names: Vec<String> = state.active.keys().cloned().collect();
        names.sort();
        names
    }
}

#[async_trait]
impl LifecycleListener for ListenerSuppressor {
    async fn on_extension_event(&self, event: ExtensionEvent) {
        match event.event_type {
            ExtensionEventType::Enabled => {
                self.handle_extension_enabled(&event.extension_name).await
            }
            ExtensionEventType::Disabled => {
                self.handle_extension_disabled(&event.extension_name).await
            }
        }
    }

    fn listener_id(&self) -> &str {
        LIFECYCLE_LISTENER_ID
    }
}
