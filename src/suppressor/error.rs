//! Suppressor Error Types

#[derive(Debug, thiserror::Error)]
pub enum SuppressorError {
    #[error("Could not read config file {path}: {cause}")]
    ConfigRead { path: String, cause: String },

    #[error("Could not parse config file {path}: {cause}")]
    ConfigParse { path: String, cause: String },

    #[error("Event type '{name}' not found!")]
    UnknownEventType { name: String },

    #[error("Type '{name}' is not an event type!")]
    NotAnEventType { name: String },

    #[error("Event '{name}' can not be listened for! (it exposes no handler list)")]
    NotListenable { name: String },

    #[error("Could not get handler list of event '{name}'! {cause}")]
    HandlerListUnavailable { name: String, cause: String },
}

/// Result type for suppressor operations
pub type SuppressorResult<T> = Result<T, SuppressorError>;
