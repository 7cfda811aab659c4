//! Cache trait and implementations.

mod file;
mod memory;
mod null;

pub use self::file::FileCache;
pub use self::memory::MemoryCache;
pub use self::null::NullCache;
use crate::error::Result;
use crate::models::{CacheEntry, MaxAge};

/// A tagged key-value cache bin.
///
/// Implementations are synchronous and must be safe to share between threads.
/// Expired entries are never returned from [`get`](CacheBackend::get);
/// whether they are purged eagerly or lazily is up to the backend.
///
/// # Examples
///
/// ```
/// use swagger_ui_cache::{CacheBackend, MaxAge, MemoryCache};
///
/// let cache = MemoryCache::new();
/// cache.set("theme", "olivero", MaxAge::Permanent, &["config:system.theme"]).unwrap();
/// assert_eq!(cache.invalidate_tags(&["config:system.theme"]).unwrap(), 1);
/// assert!(cache.get("theme").unwrap().is_none());
/// ```
pub trait CacheBackend: Send + Sync {
    /// Name of the backend, used for logging only.
    fn name(&self) -> &str;

    /// Fetch a live entry.
    fn get(&self, key: &str) -> Result<Option<CacheEntry>>;

    /// Store a value, replacing any previous entry under the same key.
    fn set(&self, key: &str, value: &str, max_age: MaxAge, tags: &[&str]) -> Result<()>;

    /// Remove an entry. Removing a key that is not present is not an error.
    fn delete(&self, key: &str) -> Result<()>;

    /// Remove every entry carrying at least one of the tags, returning how
    /// many were removed.
    fn invalidate_tags(&self, tags: &[&str]) -> Result<usize>;
}
