//! listenercontrol
//!
//! An add-on for a host runtime that selectively disables event-listener
//! registrations of other extensions (by event type, priority tier, and
//! owning extension) and restores them on config reload or when the owning
//! extension is re-enabled. The `host` module models the runtime
//! capabilities the component consumes; `suppressor` is the component
//! itself.

pub mod core;
pub mod host;
pub mod suppressor;
