//! JSON file cache backend.
//!
//! The whole bin lives in a single JSON document that is re-read on every
//! operation and replaced atomically (write to a sibling temporary file, then
//! rename) on every change. That keeps separate CLI invocations in agreement
//! without any locking beyond the process-local mutex.

use crate::CacheBackend;
use crate::error::{ErrorKind, Result};
use crate::models::{CacheEntry, MaxAge};
use exn::ResultExt;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;

type Bin = BTreeMap<String, CacheEntry>;

/// Cache persisted to a JSON file.
///
/// # Examples
///
/// ```no_run
/// use swagger_ui_cache::{CacheBackend, FileCache, MaxAge};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let cache = FileCache::new("/var/cache/swagger-ui/cache.json")?;
/// cache.set("key", "value", MaxAge::Permanent, &[])?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FileCache {
    path: PathBuf,
    lock: Mutex<()>,
}
impl FileCache {
    /// Create a file cache, creating the parent directory when needed. The
    /// file itself is only written on the first change.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let parent = Self::parent_of(&path);
        fs::create_dir_all(&parent).or_raise(|| ErrorKind::Io(parent.clone()))?;
        Ok(Self { path, lock: Mutex::new(()) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_of(path: &Path) -> PathBuf {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn load(&self) -> Result<Bin> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Bin::new()),
            Err(e) => return Err(e).or_raise(|| ErrorKind::Io(self.path.clone())),
        };
        if data.is_empty() {
            return Ok(Bin::new());
        }
        serde_json::from_slice(&data).or_raise(|| ErrorKind::InvalidData(self.path.clone()))
    }

    fn store(&self, bin: &Bin) -> Result<()> {
        let data = serde_json::to_vec_pretty(bin).or_raise(|| ErrorKind::InvalidData(self.path.clone()))?;
        let mut temp = NamedTempFile::new_in(Self::parent_of(&self.path)).or_raise(|| ErrorKind::Io(self.path.clone()))?;
        temp.write_all(&data).or_raise(|| ErrorKind::Io(self.path.clone()))?;
        temp.persist(&self.path).or_raise(|| ErrorKind::Io(self.path.clone()))?;
        Ok(())
    }

    /// Load, apply a change, and write back only when something changed.
    fn update<T>(&self, change: impl FnOnce(&mut Bin) -> (T, bool)) -> Result<T> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut bin = self.load()?;
        let (result, changed) = change(&mut bin);
        if changed {
            self.store(&bin)?;
        }
        Ok(result)
    }
}

impl CacheBackend for FileCache {
    fn name(&self) -> &str {
        "file"
    }

    fn get(&self, key: &str) -> Result<Option<CacheEntry>> {
        self.update(|bin| match bin.get(key) {
            Some(entry) if entry.is_expired() => {
                tracing::trace!(key, "Dropping expired cache entry");
                bin.remove(key);
                (None, true)
            },
            entry => (entry.cloned(), false),
        })
    }

    fn set(&self, key: &str, value: &str, max_age: MaxAge, tags: &[&str]) -> Result<()> {
        let entry = CacheEntry::new(key, value, max_age, tags);
        self.update(|bin| {
            bin.insert(key.to_string(), entry);
            ((), true)
        })
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.update(|bin| ((), bin.remove(key).is_some()))
    }

    fn invalidate_tags(&self, tags: &[&str]) -> Result<usize> {
        self.update(|bin| {
            let before = bin.len();
            bin.retain(|_, entry| !entry.has_any_tag(tags));
            let removed = before - bin.len();
            (removed, removed > 0)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (tempfile::TempDir, FileCache) {
        let temp_dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(temp_dir.path().join("nested/cache.json")).unwrap();
        (temp_dir, cache)
    }

    #[test]
    fn test_missing_file_is_empty() {
        let (_dir, cache) = fixture();
        assert!(cache.get("key").unwrap().is_none());
        assert!(!cache.path().exists());
        cache.delete("key").unwrap();
        assert!(!cache.path().exists());
    }

    #[test]
    fn test_survives_reopening() {
        let (dir, cache) = fixture();
        cache.set("key", "libraries/swagger-ui", MaxAge::Permanent, &["a", "b"]).unwrap();
        drop(cache);
        let reopened = FileCache::new(dir.path().join("nested/cache.json")).unwrap();
        let entry = reopened.get("key").unwrap().unwrap();
        assert_eq!(entry.value, "libraries/swagger-ui");
        assert_eq!(entry.tags.len(), 2);
    }

    #[test]
    fn test_invalidate_tags() {
        let (_dir, cache) = fixture();
        cache.set("one", "1", MaxAge::Permanent, &["theme"]).unwrap();
        cache.set("two", "2", MaxAge::Permanent, &["other"]).unwrap();
        assert_eq!(cache.invalidate_tags(&["theme"]).unwrap(), 1);
        assert!(cache.get("one").unwrap().is_none());
        assert!(cache.get("two").unwrap().is_some());
    }

    #[test]
    fn test_expired_entries_are_misses() {
        let (_dir, cache) = fixture();
        cache.set("key", "value", MaxAge::Seconds(0), &[]).unwrap();
        assert!(cache.get("key").unwrap().is_none());
    }

    #[test]
    fn test_corrupt_file() {
        let (_dir, cache) = fixture();
        fs::write(cache.path(), b"not json").unwrap();
        let err = cache.get("key").unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidData(_)));
        assert!(!err.is_retryable());
    }
}
