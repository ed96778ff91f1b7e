//! The per-path analysis cache and its state machine.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

/// Lifecycle of one page file in the two-phase plugin.
///
/// An absent cache entry is the "unanalyzed" state: the inject phase is a
/// no-op until the analyze phase has run for that path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorState {
    /// Analysis ran; the flag verdict is known but not yet applied.
    Analyzed { found: bool },
    /// The flag has been injected into the lowered output at least once.
    Injected { found: bool },
}

impl DescriptorState {
    pub fn found(self) -> bool {
        match self {
            Self::Analyzed { found } | Self::Injected { found } => found,
        }
    }
}

/// Path-keyed cache of analysis verdicts, injected into the plugin.
///
/// The provided [`MemoryCache`] is unsynchronized process-local state, which
/// is sound because the pipeline is single-threaded. A host that shards
/// files across workers must supply a shared or sharded implementation
/// instead; the plugin never assumes anything beyond these three methods.
pub trait AnalysisCache {
    fn get(&self, path: &Path) -> Option<DescriptorState>;
    fn set(&mut self, path: &Path, state: DescriptorState);
    fn clear(&mut self);
}

/// The default in-process cache.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: FxHashMap<PathBuf, DescriptorState>,
}

impl AnalysisCache for MemoryCache {
    fn get(&self, path: &Path) -> Option<DescriptorState> {
        self.entries.get(path).copied()
    }

    fn set(&mut self, path: &Path, state: DescriptorState) {
        self.entries.insert(path.to_path_buf(), state);
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_transitions() {
        let mut cache = MemoryCache::default();
        let path = Path::new("/routes/page.tsx");

        assert_eq!(cache.get(path), None);

        cache.set(path, DescriptorState::Analyzed { found: true });
        assert_eq!(cache.get(path), Some(DescriptorState::Analyzed { found: true }));
        assert!(cache.get(path).unwrap().found());

        cache.set(path, DescriptorState::Injected { found: true });
        assert_eq!(cache.get(path), Some(DescriptorState::Injected { found: true }));

        cache.clear();
        assert_eq!(cache.get(path), None);
    }
}
