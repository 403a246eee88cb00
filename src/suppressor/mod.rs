//! Listener Suppressor
//!
//! Selectively removes event-listener registrations of other extensions
//! based on declarative configuration, tracks what was removed, and restores
//! it on reload or extension re-enable.

// Internal modules - all access should go through api module
pub(crate) mod command;
pub(crate) mod config;
pub(crate) mod error;
pub(crate) mod manager;

// Public API module - the only public interface for the suppressor
pub mod api;
