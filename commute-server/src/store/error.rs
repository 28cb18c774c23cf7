//! Route store error types.

/// Errors that can occur when reading or writing the route store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Snapshot file could not be read or written
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot file is not valid JSON
    #[error("corrupt snapshot {path}: {message}")]
    Corrupt { path: String, message: String },

    /// Snapshot could not be serialized
    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The blocking snapshot writer panicked or was cancelled
    #[error("snapshot writer failed: {0}")]
    Writer(#[from] tokio::task::JoinError),

    /// System clock is before the unix epoch
    #[error("system time before unix epoch")]
    Clock,
}
