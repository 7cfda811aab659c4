use crate::CacheBackend;
use crate::error::Result;
use crate::models::{CacheEntry, MaxAge};
use std::collections::HashMap;
use std::sync::RwLock;

/// Process-wide in-memory cache.
///
/// Expired entries are dropped lazily, the next time they are looked up.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}
impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove `key` if it is still expired once the write lock is held; an
    /// entry written in the meantime stays.
    fn drop_expired(&self, key: &str) -> bool {
        let mut guard = self.entries.write().unwrap_or_else(|e| e.into_inner());
        if !guard.get(key).is_some_and(CacheEntry::is_expired) {
            return false;
        }
        tracing::trace!(key, "Dropping expired cache entry");
        guard.remove(key).is_some()
    }
}

impl CacheBackend for MemoryCache {
    fn name(&self) -> &str {
        "memory"
    }

    fn get(&self, key: &str) -> Result<Option<CacheEntry>> {
        let entry = self.entries.read().unwrap_or_else(|e| e.into_inner()).get(key).cloned();
        match entry {
            Some(entry) if entry.is_expired() => {
                self.drop_expired(key);
                Ok(None)
            },
            entry => Ok(entry),
        }
    }

    fn set(&self, key: &str, value: &str, max_age: MaxAge, tags: &[&str]) -> Result<()> {
        let entry = CacheEntry::new(key, value, max_age, tags);
        self.entries.write().unwrap_or_else(|e| e.into_inner()).insert(key.to_string(), entry);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.entries.write().unwrap_or_else(|e| e.into_inner()).remove(key);
        Ok(())
    }

    fn invalidate_tags(&self, tags: &[&str]) -> Result<usize> {
        let mut guard = self.entries.write().unwrap_or_else(|e| e.into_inner());
        let before = guard.len();
        guard.retain(|_, entry| !entry.has_any_tag(tags));
        Ok(before - guard.len())
    }
}
