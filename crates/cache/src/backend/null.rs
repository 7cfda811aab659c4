use crate::CacheBackend;
use crate::error::Result;
use crate::models::{CacheEntry, MaxAge};

/// Cache that stores nothing.
///
/// Every lookup is a miss, so anything built on top of it recomputes (and
/// revalidates) on every call.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullCache;

impl CacheBackend for NullCache {
    fn name(&self) -> &str {
        "null"
    }

    fn get(&self, _key: &str) -> Result<Option<CacheEntry>> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str, _max_age: MaxAge, _tags: &[&str]) -> Result<()> {
        Ok(())
    }

    fn delete(&self, _key: &str) -> Result<()> {
        Ok(())
    }

    fn invalidate_tags(&self, _tags: &[&str]) -> Result<usize> {
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_stores() {
        let cache = NullCache;
        cache.set("key", "value", MaxAge::Permanent, &["tag"]).unwrap();
        assert!(cache.get("key").unwrap().is_none());
        assert_eq!(cache.invalidate_tags(&["tag"]).unwrap(), 0);
        cache.delete("key").unwrap();
    }
}
