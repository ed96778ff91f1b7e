//! # quire_descriptor
//!
//! Build-time descriptor-flag analysis and injection.
//!
//! Some component roots need to know at render time whether a descriptive
//! part is present anywhere below them, information that is statically
//! knowable but expensive (or impossible) to derive at runtime when the part
//! arrives through an imported sub-component. This crate bakes that boolean
//! into the compiled output instead, as a two-phase bundler plugin:
//!
//! - **Analyze** (on load of a page source file): walk the page's JSX tree;
//!   the flag is true when the marker leaf renders under the marker root,
//!   either directly or inside any custom component imported into the page.
//!   The verdict is cached per absolute path.
//! - **Inject** (on transform of the same file, after the framework has
//!   lowered JSX to factory calls): find the lowered call for the marker
//!   root and set the flag property on its props literal.
//!
//! Analysis never fails a build: parse and resolution errors are logged and
//! read as "flag absent" for the affected file.

mod analyze;
mod cache;
mod error;
mod inject;
mod options;
mod plugin;

pub use analyze::{analyze_page, Candidate};
pub use cache::{AnalysisCache, DescriptorState, MemoryCache};
pub use error::DescriptorError;
pub use inject::inject_flag;
pub use options::DescriptorOptions;
pub use plugin::{DescriptorPlugin, LoadOutcome, TransformOutput};
