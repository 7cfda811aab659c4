//! Cacheability metadata.
//!
//! Anything whose output depends on cached state reports the tags, contexts
//! and max age that a downstream page cache has to honour. Metadata from
//! several dependencies merges into one set.

use crate::models::MaxAge;
use serde::Serialize;
use std::collections::BTreeSet;

/// Tags, contexts and max age of a computed value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CacheableMetadata {
    pub tags: BTreeSet<String>,
    pub contexts: BTreeSet<String>,
    pub max_age: MaxAge,
}
impl Default for CacheableMetadata {
    fn default() -> Self {
        Self { tags: BTreeSet::new(), contexts: BTreeSet::new(), max_age: MaxAge::Permanent }
    }
}
impl CacheableMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tags<'a>(mut self, tags: impl IntoIterator<Item = &'a str>) -> Self {
        self.tags.extend(tags.into_iter().map(str::to_string));
        self
    }

    pub fn with_contexts<'a>(mut self, contexts: impl IntoIterator<Item = &'a str>) -> Self {
        self.contexts.extend(contexts.into_iter().map(str::to_string));
        self
    }

    pub fn with_max_age(mut self, max_age: MaxAge) -> Self {
        self.max_age = max_age;
        self
    }

    /// Combine with another dependency: tags and contexts are unioned, the
    /// stricter max age wins.
    pub fn merge(mut self, other: &CacheableMetadata) -> Self {
        self.tags.extend(other.tags.iter().cloned());
        self.contexts.extend(other.contexts.iter().cloned());
        self.max_age = self.max_age.min(other.max_age);
        self
    }
}

/// Something that can describe its own cacheability.
pub trait CacheableDependency {
    fn cacheability(&self) -> CacheableMetadata;
}
