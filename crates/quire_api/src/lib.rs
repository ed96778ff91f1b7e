//! # quire_api
//!
//! Component API extraction and documentation aggregation.
//!
//! This crate turns a component directory into one persisted documentation
//! model:
//!
//! - [`extract`]: walk a single implementation file and produce the
//!   documented types, inherited element and data attributes of one
//!   component part.
//! - [`resolve_anatomy`]: walk the directory's barrel file and correlate
//!   each re-exported part with a description mined from its sibling file.
//! - [`aggregate_component`]: fold the above, plus the hand-maintained
//!   `metadata.json`, into a [`ComponentDocumentation`] and persist it as the
//!   generated `auto-api/api.ts` module.
//!
//! Everything here is syntactic. There is no type checking: default values,
//! attribute types and inherited elements are all recovered by heuristics
//! over the tree and the raw source text, and the documented tie-breaks for
//! ambiguous matches are deliberate (see DESIGN.md).

mod aggregate;
mod anatomy;
mod error;
mod extract;
mod markdown;
mod model;

pub use aggregate::{
    aggregate_component, write_artifact, AggregateOptions, ARTIFACT_DIR, ARTIFACT_FILE,
    BARREL_FILE, METADATA_FILE,
};
pub use anatomy::{kebab_case, resolve_anatomy};
pub use error::ApiError;
pub use extract::{extract, part_name_from_stem, ExtractOptions, PROPS_OF, PUBLIC_TYPE_PREFIX};
pub use markdown::generate_markdown;
pub use model::{
    AnatomyItem, ComponentDocumentation, ComponentMetadata, DataAttribute, KeyEntry, ParsedProp,
    PublicTypeGroup, SubComponent, SubComponentEntry,
};
