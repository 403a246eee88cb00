//! Public API for the listener suppressor
//!
//! This module provides the complete public API for the suppressor
//! component. External modules should import from here rather than directly
//! from internal modules.

// The component itself
pub use crate::suppressor::manager::{
    ActiveSuppression, ListenerSuppressor, RemovedRegistration, LIFECYCLE_LISTENER_ID,
};

// Configuration
pub use crate::suppressor::config::{
    SuppressionConfig, SuppressionRule, DEACTIVATED_EVENTS_KEY, DEFAULT_CONFIG,
};

// Administrative command
pub use crate::suppressor::command::{COMMAND_NAME, RELOAD_PERMISSION};

// Error handling
pub use crate::suppressor::error::{SuppressorError, SuppressorResult};
