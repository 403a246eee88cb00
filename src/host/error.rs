//! Host Surface Error Types

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("Handler list of '{event}' is sealed and rejects further registration")]
    HandlerListSealed { event: String },

    #[error("Listener {listener_id} is already registered with '{event}'")]
    AlreadyRegistered { listener_id: u64, event: String },

    #[error("Listener {listener_id} is not registered with '{event}'")]
    NotRegistered { listener_id: u64, event: String },

    #[error("Extension not found: {name}")]
    ExtensionNotFound { name: String },

    #[error("Extension '{name}' is already registered")]
    ExtensionAlreadyRegistered { name: String },
}

/// Result type for host surface operations
pub type HostResult<T> = Result<T, HostError>;
