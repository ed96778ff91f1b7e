//! Plugin options.

use compact_str::CompactString;

/// Configuration of the marker family and the lowered-output shape.
///
/// The marker family is the set of parts of one logical component: a root
/// element (`<Field.Root>`) and the descriptive leaf (`<Field.Description>`).
/// The factory identifier and wrapper names describe what the framework's
/// optimizer lowers pages to before the inject phase sees them.
#[derive(Debug, Clone)]
pub struct DescriptorOptions {
    /// Family component name as used in JSX member expressions.
    pub component: CompactString,
    /// Root part name.
    pub root: CompactString,
    /// Descriptive leaf part name.
    pub leaf: CompactString,
    /// Props property injected on the lowered root call.
    pub flag_prop: CompactString,
    /// Identifier of the lowered JSX factory call.
    pub jsx_factory: CompactString,
    /// Wrapper calls to fold through when walking an imported module's
    /// exported components (`component$(() => …)` style).
    pub component_wrappers: Vec<CompactString>,
}

impl Default for DescriptorOptions {
    fn default() -> Self {
        Self {
            component: CompactString::const_new("Field"),
            root: CompactString::const_new("Root"),
            leaf: CompactString::const_new("Description"),
            flag_prop: CompactString::const_new("hasDescription"),
            jsx_factory: CompactString::const_new("_jsxC"),
            component_wrappers: vec![CompactString::const_new("component$")],
        }
    }
}

impl DescriptorOptions {
    /// Dotted name of the root as it appears in lowered calls,
    /// e.g. `"Field.Root"`.
    pub fn root_path(&self) -> String {
        format!("{}.{}", self.component, self.root)
    }

    pub fn is_wrapper(&self, name: &str) -> bool {
        self.component_wrappers.iter().any(|w| w.as_str() == name)
    }
}
