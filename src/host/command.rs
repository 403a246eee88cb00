//! Command dispatch surface
//!
//! The host's command dispatcher hands commands to add-ons together with the
//! invoking principal. Add-ons only ever see this trait; permission checks
//! and reply routing stay on the host side.

/// The principal a command was invoked by
pub trait CommandSender: Send + Sync {
    /// Display name of the sender
    fn name(&self) -> &str;

    /// Whether the sender holds the given permission node
    fn has_permission(&self, node: &str) -> bool;

    /// Send a reply message back to the sender
    fn send_message(&self, message: &str);
}

/// The host console: holds every permission, replies through the log sink
pub struct ConsoleSender;

impl CommandSender for ConsoleSender {
    fn name(&self) -> &str {
        "console"
    }

    fn has_permission(&self, _node: &str) -> bool {
        true
    }

    fn send_message(&self, message: &str) {
        log::info!("{}", message);
    }
}
