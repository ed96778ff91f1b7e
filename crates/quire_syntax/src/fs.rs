//! File-system capability interface.
//!
//! The pipeline is synchronous and single-threaded, so the interface is too.
//! Hosts hand the pipeline whichever implementation fits: the std-backed
//! [`OsFileSystem`] in the CLI, [`MemoryFileSystem`] in tests.

use std::cell::RefCell;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::rc::Rc;

use rustc_hash::FxHashMap;

/// Synchronous file-system access as seen by the pipeline.
pub trait FileSystem {
    fn read_file(&self, path: &Path) -> io::Result<String>;
    fn write_file(&self, path: &Path, text: &str) -> io::Result<()>;
    fn exists(&self, path: &Path) -> bool;
    /// Entry names of a directory, in no particular order. Callers that need
    /// determinism sort the result.
    fn list_dir(&self, path: &Path) -> io::Result<Vec<String>>;
    fn mkdir(&self, path: &Path) -> io::Result<()>;
}

/// `std::fs`-backed implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn read_file(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write_file(&self, path: &Path, text: &str) -> io::Result<()> {
        std::fs::write(path, text)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(path)? {
            names.push(entry?.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }

    fn mkdir(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }
}

/// In-memory implementation for tests and hermetic runs.
///
/// Clones share the same backing map, so a test can keep a handle and inspect
/// what the pipeline wrote. Interior mutability is a `RefCell`: the pipeline
/// is single-threaded by design, and this type is deliberately not `Send`.
#[derive(Debug, Default, Clone)]
pub struct MemoryFileSystem {
    files: Rc<RefCell<FxHashMap<PathBuf, String>>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file.
    pub fn insert(&self, path: impl Into<PathBuf>, text: impl Into<String>) {
        self.files
            .borrow_mut()
            .insert(normalize(&path.into()), text.into());
    }

    /// Read back a file, if present.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.borrow().get(&normalize(path.as_ref())).cloned()
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_file(&self, path: &Path) -> io::Result<String> {
        self.get(path)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
    }

    fn write_file(&self, path: &Path, text: &str) -> io::Result<()> {
        self.insert(path, text);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let path = normalize(path);
        let files = self.files.borrow();
        files.contains_key(&path) || files.keys().any(|k| k.starts_with(&path))
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        let path = normalize(path);
        let mut names: Vec<String> = Vec::new();
        for key in self.files.borrow().keys() {
            let Ok(rest) = key.strip_prefix(&path) else {
                continue;
            };
            if let Some(Component::Normal(first)) = rest.components().next() {
                let name = first.to_string_lossy().into_owned();
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        if names.is_empty() && !self.exists(&path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                path.display().to_string(),
            ));
        }
        Ok(names)
    }

    fn mkdir(&self, _path: &Path) -> io::Result<()> {
        // Directories are implied by file paths.
        Ok(())
    }
}

/// Resolve `.` and `..` components so lookups match regardless of how the
/// path was spelled.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_fs_round_trip() {
        let fs = MemoryFileSystem::new();
        fs.insert("/app/checkbox/index.ts", "export {}");
        assert!(fs.exists(Path::new("/app/checkbox/index.ts")));
        assert!(fs.exists(Path::new("/app/checkbox")));
        assert_eq!(
            fs.read_file(Path::new("/app/checkbox/index.ts")).unwrap(),
            "export {}"
        );
        assert!(fs.read_file(Path::new("/app/missing.ts")).is_err());
    }

    #[test]
    fn memory_fs_lists_immediate_children() {
        let fs = MemoryFileSystem::new();
        fs.insert("/app/checkbox/index.ts", "");
        fs.insert("/app/checkbox/auto-api/api.ts", "");
        fs.insert("/app/switch/index.ts", "");

        let mut names = fs.list_dir(Path::new("/app/checkbox")).unwrap();
        names.sort();
        assert_eq!(names, vec!["auto-api", "index.ts"]);

        let mut roots = fs.list_dir(Path::new("/app")).unwrap();
        roots.sort();
        assert_eq!(roots, vec!["checkbox", "switch"]);
    }

    #[test]
    fn memory_fs_normalizes_dot_segments() {
        let fs = MemoryFileSystem::new();
        fs.insert("/app/checkbox/root.tsx", "x");
        assert!(fs.exists(Path::new("/app/checkbox/./root.tsx")));
        assert!(fs.exists(Path::new("/app/switch/../checkbox/root.tsx")));
    }

    #[test]
    fn os_fs_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let fs = OsFileSystem;
        let nested = dir.path().join("auto-api");

        fs.mkdir(&nested).unwrap();
        fs.write_file(&nested.join("api.ts"), "export const api = {};\n")
            .unwrap();

        assert!(fs.exists(&nested.join("api.ts")));
        assert_eq!(
            fs.read_file(&nested.join("api.ts")).unwrap(),
            "export const api = {};\n"
        );
        assert_eq!(fs.list_dir(&nested).unwrap(), vec!["api.ts"]);
    }

    #[test]
    fn clones_share_the_backing_map() {
        let fs = MemoryFileSystem::new();
        let handle = fs.clone();
        fs.write_file(Path::new("/out.txt"), "written").unwrap();
        assert_eq!(handle.get("/out.txt").as_deref(), Some("written"));
    }
}
