//! Tagged key-value cache.
//!
//! This crate provides the cache bin that library discovery writes its
//! validated location into. Entries carry a max age and a set of tags; any
//! subsystem can expire every entry carrying a tag without knowing the keys
//! (the classic example being "the default theme changed").
//!
//! # Backends
//! - [`MemoryCache`]: process-wide, lost on exit.
//! - [`FileCache`]: a JSON file on disk, shared between invocations.
//! - [`NullCache`]: stores nothing; every lookup is a miss.

pub mod backend;
mod cacheability;
pub mod error;
mod models;

pub use crate::backend::{CacheBackend, FileCache, MemoryCache, NullCache};
pub use crate::cacheability::{CacheableDependency, CacheableMetadata};
pub use crate::models::{CacheEntry, MaxAge};
use std::sync::Arc;

pub type CacheHandle = Arc<dyn CacheBackend + Send + Sync>;
