//! Module-path resolution capability.
//!
//! The host bundler owns real resolution; the pipeline only needs
//! "specifier + importing file -> absolute path". [`ExtensionResolver`] is
//! the stand-alone fallback for relative specifiers, probing the same
//! extension list a bundler would.

use std::path::{Path, PathBuf};

use crate::fs::FileSystem;

/// Resolve an import specifier relative to the file that contains it.
pub trait ModuleResolver {
    /// `None` when the specifier cannot be resolved; callers treat that the
    /// same as a parse failure for the importing side (skip, don't abort).
    fn resolve(&self, specifier: &str, from: &Path) -> Option<PathBuf>;
}

/// Closures work as resolvers; handy for tests and for bridging a host
/// bundler's callback.
impl<F> ModuleResolver for F
where
    F: Fn(&str, &Path) -> Option<PathBuf>,
{
    fn resolve(&self, specifier: &str, from: &Path) -> Option<PathBuf> {
        self(specifier, from)
    }
}

/// Extension-probing resolver for relative specifiers.
///
/// Bare specifiers (packages) resolve to `None`; those belong to the host.
pub struct ExtensionResolver<F: FileSystem> {
    fs: F,
    extensions: Vec<String>,
}

impl<F: FileSystem> ExtensionResolver<F> {
    pub fn new(fs: F) -> Self {
        Self {
            fs,
            extensions: [".tsx", ".ts", ".jsx", ".js"]
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }

    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }
}

impl<F: FileSystem> ModuleResolver for ExtensionResolver<F> {
    fn resolve(&self, specifier: &str, from: &Path) -> Option<PathBuf> {
        if !specifier.starts_with('.') {
            return None;
        }
        let base = from.parent()?.join(specifier);

        for ext in &self.extensions {
            let mut candidate = base.clone().into_os_string();
            candidate.push(ext);
            let candidate = PathBuf::from(candidate);
            if self.fs.exists(&candidate) {
                return Some(candidate);
            }
        }
        // Exact hit (specifier already carries its extension).
        if self.fs.exists(&base) && base.extension().is_some() {
            return Some(base);
        }
        // Directory import.
        for ext in &self.extensions {
            let candidate = base.join(format!("index{ext}"));
            if self.fs.exists(&candidate) {
                return Some(candidate);
            }
        }
        None
    }
}
