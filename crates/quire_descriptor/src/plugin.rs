//! The bundler-facing plugin: load/transform hooks over the analysis cache.

use std::path::Path;

use quire_syntax::{FileSystem, ModuleResolver};

use crate::analyze::analyze_page;
use crate::cache::{AnalysisCache, DescriptorState, MemoryCache};
use crate::inject::inject_flag;
use crate::options::DescriptorOptions;

/// Result of the load hook.
///
/// This plugin only observes sources, so it always passes; the variant
/// carrying replacement text exists for hook-shape completeness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Source(String),
    Pass,
}

/// Result of the transform hook when the code was rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutput {
    pub code: String,
}

/// The two-phase descriptor-flag plugin.
///
/// Owns its [`AnalysisCache`]: verdicts live for the lifetime of the plugin
/// instance, keyed by absolute path, and are never invalidated; a file
/// change shows up as a fresh plugin instance in the hosts this targets.
pub struct DescriptorPlugin {
    options: DescriptorOptions,
    fs: Box<dyn FileSystem>,
    resolver: Box<dyn ModuleResolver>,
    cache: Box<dyn AnalysisCache>,
}

impl DescriptorPlugin {
    pub fn new(
        fs: Box<dyn FileSystem>,
        resolver: Box<dyn ModuleResolver>,
        options: DescriptorOptions,
    ) -> Self {
        Self {
            options,
            fs,
            resolver,
            cache: Box::new(MemoryCache::default()),
        }
    }

    /// Substitute the cache: test isolation, or a shared store for
    /// multi-worker hosts.
    pub fn with_cache(mut self, cache: Box<dyn AnalysisCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn options(&self) -> &DescriptorOptions {
        &self.options
    }

    /// Cached state for a path, mainly for diagnostics.
    pub fn state(&self, path: &Path) -> Option<DescriptorState> {
        self.cache.get(path)
    }

    /// Load hook: lazily analyze the page on its first load.
    pub fn on_load(&mut self, path: &Path) -> LoadOutcome {
        if self.cache.get(path).is_none() {
            let found = analyze_page(self.fs.as_ref(), self.resolver.as_ref(), &self.options, path);
            tracing::debug!(path = %path.display(), found, "descriptor analysis cached");
            self.cache.set(path, DescriptorState::Analyzed { found });
        }
        LoadOutcome::Pass
    }

    /// Transform hook: inject the cached verdict into lowered code.
    ///
    /// No cached value (the analyze phase never ran for this path) means
    /// no-op, as does lowered code without a marker-root factory call.
    pub fn on_transform(&mut self, path: &Path, code: &str) -> Option<TransformOutput> {
        let state = self.cache.get(path)?;
        let found = state.found();
        let code = inject_flag(code, path, found, &self.options)?;
        self.cache.set(path, DescriptorState::Injected { found });
        Some(TransformOutput { code })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_syntax::{ExtensionResolver, MemoryFileSystem};

    fn plugin_with(fs: MemoryFileSystem) -> DescriptorPlugin {
        let resolver = ExtensionResolver::new(fs.clone());
        DescriptorPlugin::new(
            Box::new(fs),
            Box::new(resolver),
            DescriptorOptions::default(),
        )
    }

    const PAGE: &str = r#"
import { Field } from '@quire/kit';
export default component$(() => (
  <Field.Root>
    <Field.Description>hint</Field.Description>
  </Field.Root>
));
"#;

    const LOWERED: &str =
        "export default _jsxC(Field.Root, { class: \"field\" }, 3, \"xY\");";

    #[test]
    fn load_then_transform_injects_the_flag() {
        let fs = MemoryFileSystem::new();
        fs.insert("/routes/page.tsx", PAGE);
        let mut plugin = plugin_with(fs);

        let path = Path::new("/routes/page.tsx");
        assert_eq!(plugin.on_load(path), LoadOutcome::Pass);
        assert_eq!(
            plugin.state(path),
            Some(DescriptorState::Analyzed { found: true })
        );

        let out = plugin.on_transform(path, LOWERED).unwrap();
        assert!(out.code.contains("hasDescription: true"));
        assert_eq!(
            plugin.state(path),
            Some(DescriptorState::Injected { found: true })
        );
    }

    #[test]
    fn transform_without_analysis_is_a_no_op() {
        let fs = MemoryFileSystem::new();
        fs.insert("/routes/page.tsx", PAGE);
        let mut plugin = plugin_with(fs);

        assert!(plugin
            .on_transform(Path::new("/routes/page.tsx"), LOWERED)
            .is_none());
    }

    #[test]
    fn repeated_injection_is_stable() {
        let fs = MemoryFileSystem::new();
        fs.insert("/routes/page.tsx", PAGE);
        let mut plugin = plugin_with(fs);
        let path = Path::new("/routes/page.tsx");

        plugin.on_load(path);
        let first = plugin.on_transform(path, LOWERED).unwrap();
        let second = plugin.on_transform(path, LOWERED).unwrap();
        assert_eq!(first, second);

        // Feeding the already-injected output back reports unchanged.
        assert!(plugin.on_transform(path, &first.code).is_none());
    }

    #[test]
    fn load_is_idempotent_per_path() {
        let fs = MemoryFileSystem::new();
        fs.insert("/routes/page.tsx", PAGE);
        let handle = fs.clone();
        let mut plugin = plugin_with(fs);
        let path = Path::new("/routes/page.tsx");

        plugin.on_load(path);
        // Even if the file changes on disk, the verdict is cached for the
        // plugin's lifetime.
        handle.insert("/routes/page.tsx", "export const nothing = 1;");
        plugin.on_load(path);
        assert_eq!(
            plugin.state(path),
            Some(DescriptorState::Analyzed { found: true })
        );
    }

    #[test]
    fn page_without_family_gets_false_flag() {
        let fs = MemoryFileSystem::new();
        fs.insert("/routes/plain.tsx", "export default component$(() => <main />);");
        let mut plugin = plugin_with(fs);
        let path = Path::new("/routes/plain.tsx");

        plugin.on_load(path);
        let out = plugin.on_transform(path, LOWERED).unwrap();
        assert!(out.code.contains("hasDescription: false"));
    }
}
