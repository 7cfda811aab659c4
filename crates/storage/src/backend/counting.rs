//! Call-counting filesystem decorator.
//!
//! Wraps another backend and counts every lookup and read that passes through
//! it. Discovery promises not to touch the filesystem on a cache hit; this is
//! how that promise gets checked.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{EntryKind, Filesystem, FilesystemHandle, error::Result};

/// Snapshot of the calls made through a [`CountingFilesystem`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CallCounts {
    /// Calls to [`Filesystem::kind`] (and the helpers built on it).
    pub lookups: usize,
    /// Calls to [`Filesystem::read`].
    pub reads: usize,
}
impl CallCounts {
    pub fn total(&self) -> usize {
        self.lookups + self.reads
    }
}

/// Counting filesystem decorator.
///
/// Forwards to the inner backend unchanged and emits a
/// [`trace event`](tracing::Event) per call.
pub struct CountingFilesystem {
    inner: FilesystemHandle,
    lookups: AtomicUsize,
    reads: AtomicUsize,
}
impl CountingFilesystem {
    pub fn new(inner: FilesystemHandle) -> Self {
        Self {
            inner,
            lookups: AtomicUsize::new(0),
            reads: AtomicUsize::new(0),
        }
    }

    pub fn counts(&self) -> CallCounts {
        CallCounts {
            lookups: self.lookups.load(Ordering::Relaxed),
            reads: self.reads.load(Ordering::Relaxed),
        }
    }

    pub fn reset_counts(&self) {
        self.lookups.store(0, Ordering::Relaxed);
        self.reads.store(0, Ordering::Relaxed);
    }
}

impl Filesystem for CountingFilesystem {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn kind(&self, path: &Path) -> Result<Option<EntryKind>> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(backend = self.inner.name(), path = %path.display(), "Filesystem lookup");
        self.inner.kind(path)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(backend = self.inner.name(), path = %path.display(), "Filesystem read");
        self.inner.read(path)
    }
}
