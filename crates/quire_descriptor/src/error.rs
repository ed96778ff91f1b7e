//! Error types for quire_descriptor.

use thiserror::Error;

/// Internal failures during analysis.
///
/// These never escape the plugin: the public entry points catch them, log
/// them, and read the affected file as "flag absent". The type exists so the
/// fallible internals can use `?` and the boundary stays in one place.
#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error(transparent)]
    Syntax(#[from] quire_syntax::SyntaxError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
