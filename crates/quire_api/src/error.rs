//! Error types for quire_api.

use thiserror::Error;

/// Errors produced while aggregating a component directory.
///
/// Per-file parse failures are not errors: the affected file simply
/// contributes no data (logged at `warn`). These variants cover the failures
/// that are surfaced per directory.
#[derive(Debug, Error)]
pub enum ApiError {
    /// IO error from the host file system.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The path handed to the aggregator is not a usable component directory.
    #[error("invalid component directory: {path}")]
    InvalidDirectory { path: String },

    /// `metadata.json` exists but is not valid JSON of the expected shape.
    /// Fails this directory only; other components keep processing.
    #[error("malformed metadata at {path}: {source}")]
    Metadata {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The documentation model could not be serialized.
    #[error("failed to serialize documentation: {0}")]
    Serialize(#[source] serde_json::Error),
}
