//! Administrative command
//!
//! The host registers the `listenercontrol` command and routes invocations
//! here. Only `reload` from a sender holding the reload permission is
//! handled; everything else falls through to the host's usage output.

use crate::host::api::CommandSender;
use crate::suppressor::manager::ListenerSuppressor;

/// Name the command is registered under with the host dispatcher
pub const COMMAND_NAME: &str = "listenercontrol";

/// Permission node required to trigger a reload
pub const RELOAD_PERMISSION: &str = "listenercontrol.command.reload";

impl ListenerSuppressor {
    /// Handle one invocation of the `listenercontrol` command
    ///
    /// Returns true when the invocation was handled, false to let the host
    /// print its default usage message.
    pub async fn handle_command(&self, sender: &dyn CommandSender, args: &[&str]) -> bool {
        let Some(subcommand) = args.first() else {
            return false;
        };
        if !subcommand.eq_ignore_ascii_case("reload")
            || !sender.has_permission(RELOAD_PERMISSION)
        {
            return false;
        }

        log::debug!("Config reload triggered by {}", sender.name());
        self.load_config().await;
        sender.send_message("Config reloaded!");
        true
    }
}
