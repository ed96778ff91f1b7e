//! # quire_promote
//!
//! The public-type promotion codemod.
//!
//! An external analysis pass decides which type declarations should follow
//! the `Public…` naming convention and hands this crate a list of
//! [`PromotionTarget`]s: opaque source-text fragments. The codemod never
//! interprets a target semantically: a declaration is promoted when its
//! rendered source text contains a target as a substring, and a type
//! reference is promoted when its name occurs inside a target. Already
//! prefixed names are always left alone, which is what makes repeated
//! application converge after one pass.
//!
//! The file is reprinted as a whole; original formatting is the concern of
//! the downstream formatter, not of this crate.

mod error;
mod transform;

use std::path::Path;

use serde::{Deserialize, Serialize};

use quire_syntax::FileSystem;

pub use error::PromoteError;
pub use transform::promote_source;

/// Reserved naming marker of public types.
pub const PUBLIC_TYPE_PREFIX: &str = "Public";

/// An opaque source-text fragment identifying a declaration or reference to
/// promote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionTarget {
    pub target_line: String,
}

/// One file's worth of promotion work, as produced by the external analysis
/// collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionRequest {
    pub filename: String,
    pub comments: Vec<PromotionTarget>,
}

/// Promote a file on disk; returns the new source text without writing it.
pub fn promote_file(
    fs: &dyn FileSystem,
    path: &Path,
    targets: &[PromotionTarget],
) -> Result<String, PromoteError> {
    let source = fs.read_file(path)?;
    promote_source(&source, path, targets)
}

/// Apply one promotion request, writing the file back when it changed.
///
/// Returns whether the file was rewritten.
pub fn apply_request(
    fs: &dyn FileSystem,
    root: &Path,
    request: &PromotionRequest,
) -> Result<bool, PromoteError> {
    let path = root.join(&request.filename);
    let source = fs.read_file(&path)?;
    let promoted = promote_source(&source, &path, &request.comments)?;
    if promoted == source {
        return Ok(false);
    }
    fs.write_file(&path, &promoted)?;
    Ok(true)
}
