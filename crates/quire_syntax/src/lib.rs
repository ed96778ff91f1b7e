//! # quire_syntax
//!
//! The parsing layer for the quire toolkit.
//!
//! Everything downstream of this crate (API extraction, anatomy resolution,
//! type promotion, descriptor-flag injection) starts from the same three
//! primitives provided here:
//!
//! - [`parse_tsx`]: parse a TypeScript/TSX file into an OXC syntax tree,
//!   borrowing from a caller-owned allocator.
//! - [`leading_comment`] / [`span_text`]: recover the comment block
//!   immediately preceding a node, and slice the original source for any span.
//! - The host capability interfaces: [`FileSystem`] and [`ModuleResolver`],
//!   with std-backed and in-memory implementations.
//!
//! The capability interfaces exist so the pipeline never touches the real
//! file system or the host bundler's resolver directly; tests and alternative
//! hosts substitute their own implementations.

mod comments;
mod error;
mod fs;
mod parse;
mod resolve;

pub use comments::{leading_comment, strip_comment_text};
pub use error::SyntaxError;
pub use fs::{FileSystem, MemoryFileSystem, OsFileSystem};
pub use parse::{parse_tsx, span_text, ParsedSource};
pub use resolve::{ExtensionResolver, ModuleResolver};

// Re-export the allocator so callers don't need a direct oxc_allocator
// dependency just to own the arena.
pub use oxc_allocator::Allocator;
