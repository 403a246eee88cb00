//! Host Runtime Surface
//!
//! Models the capabilities the host runtime provides to this add-on:
//! priority tiers, per-event-type dispatch tables, a lookup-by-name type
//! registry, the extension registry, lifecycle event delivery, and the
//! command dispatch surface.

// Internal modules - all access should go through api module
pub(crate) mod command;
pub(crate) mod error;
pub(crate) mod extension;
pub(crate) mod handler;
pub(crate) mod lifecycle;
pub(crate) mod priority;
pub(crate) mod types;

// Public API module - the only public interface for the host surface
pub mod api;
