//! Error types for quire_promote.

use thiserror::Error;

/// Errors produced by the promotion codemod.
///
/// Unlike the documentation pipeline, promotion rewrites a file in place, so
/// a parse failure here is a real error: rewriting a tree the parser gave up
/// on would risk destroying the file.
#[derive(Debug, Error)]
pub enum PromoteError {
    /// The file could not be parsed into a rewritable tree.
    #[error(transparent)]
    Syntax(#[from] quire_syntax::SyntaxError),

    /// IO error from the host file system.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
