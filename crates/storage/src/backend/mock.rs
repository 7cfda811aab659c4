//! In-memory filesystem backend for testing.

use crate::error::{ErrorKind, Result};
use crate::path::validate as validate_path;
use crate::{EntryKind, Filesystem};
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// In-memory filesystem backend for testing.
///
/// Files are stored in a `HashMap` behind a [`RwLock`], so fixtures can be
/// changed between calls (delete a required file, corrupt a manifest) while a
/// discovery service holds a shared handle. Every ancestor of a file counts as
/// a directory; empty directories can be added explicitly.
///
/// # Examples
///
/// ```
/// use swagger_ui_storage::backend::MockFilesystem;
/// use swagger_ui_storage::Filesystem;
/// use std::path::Path;
///
/// let fs = MockFilesystem::with_files([
///     ("libraries/swagger-ui/package.json", r#"{"version":"5.17.14"}"#),
/// ]);
/// assert!(fs.is_dir(Path::new("libraries/swagger-ui")).unwrap());
/// assert!(fs.is_file(Path::new("libraries/swagger-ui/package.json")).unwrap());
/// ```
pub struct MockFilesystem {
    name: String,
    files: RwLock<HashMap<PathBuf, Vec<u8>>>,
    directories: RwLock<BTreeSet<PathBuf>>,
}

impl MockFilesystem {
    /// Create a mock filesystem pre-populated with files.
    ///
    /// Panics if any path fails validation (e.g. path traversal). If test
    /// setup is wrong, then test should not pass.
    pub fn with_files(files: impl IntoIterator<Item = (impl Into<PathBuf>, impl Into<Vec<u8>>)>) -> Self {
        let fs = Self {
            name: "mock".to_string(),
            files: RwLock::new(HashMap::new()),
            directories: RwLock::new(BTreeSet::new()),
        };
        for (path, data) in files {
            fs.insert(path, data);
        }
        fs
    }

    /// Add empty directories (and their ancestors).
    pub fn with_directories(self, directories: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        for directory in directories {
            let directory = Self::validated(directory.into());
            self.add_ancestors(&directory);
            self.directories.write().unwrap_or_else(|e| e.into_inner()).insert(directory);
        }
        self
    }

    /// Change the name of the mock backend.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Create or overwrite a file.
    pub fn insert(&self, path: impl Into<PathBuf>, data: impl Into<Vec<u8>>) {
        let path = Self::validated(path.into());
        if let Some(parent) = path.parent() {
            self.add_ancestors(parent);
        }
        self.files.write().unwrap_or_else(|e| e.into_inner()).insert(path, data.into());
    }

    /// Remove a file, returning whether it existed. Parent directories stay.
    pub fn remove(&self, path: impl AsRef<Path>) -> bool {
        let path = Self::validated(path.as_ref().to_path_buf());
        self.files.write().unwrap_or_else(|e| e.into_inner()).remove(&path).is_some()
    }

    fn validated(path: PathBuf) -> PathBuf {
        let Ok(validated) = validate_path(&path) else {
            // The panic here is DELIBERATE. MockFilesystem is intended to be
            // used in tests; panics are expected. There is no error result.
            panic!("MockFilesystem: invalid path {}", path.display());
        };
        validated
    }

    fn add_ancestors(&self, directory: &Path) {
        let mut guard = self.directories.write().unwrap_or_else(|e| e.into_inner());
        for ancestor in directory.ancestors().filter(|a| !a.as_os_str().is_empty()) {
            guard.insert(ancestor.to_path_buf());
        }
    }
}
impl Default for MockFilesystem {
    fn default() -> Self {
        let files: [(&str, &str); 0] = [];
        Self::with_files(files)
    }
}

impl Filesystem for MockFilesystem {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self, path: &Path) -> Result<Option<EntryKind>> {
        let path = validate_path(path)?;
        if self.files.read().unwrap_or_else(|e| e.into_inner()).contains_key(&path) {
            return Ok(Some(EntryKind::File));
        }
        if self.directories.read().unwrap_or_else(|e| e.into_inner()).contains(&path) {
            return Ok(Some(EntryKind::Directory));
        }
        Ok(None)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let path = validate_path(path)?;
        if let Some(data) = self.files.read().unwrap_or_else(|e| e.into_inner()).get(&path) {
            return Ok(data.clone());
        }
        if self.directories.read().unwrap_or_else(|e| e.into_inner()).contains(&path) {
            exn::bail!(ErrorKind::NotAFile(path));
        }
        exn::bail!(ErrorKind::NotFound(path))
    }
}
