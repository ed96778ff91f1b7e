//! Error types for quire_syntax.

use thiserror::Error;

/// Errors produced by the parsing layer.
#[derive(Debug, Error)]
pub enum SyntaxError {
    /// The parser gave up on the file entirely.
    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    /// IO error from the host file system.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
