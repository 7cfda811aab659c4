//! Filesystem trait and implementations.
//!
//! This module defines the [`Filesystem`] trait, which provides the handful of
//! read-only operations that library discovery performs against the
//! application root (local disk, in-memory fixtures, or a decorator counting
//! calls for tests and diagnostics).

mod counting;
mod local;
#[cfg(feature = "mock")]
mod mock;

pub use self::counting::{CallCounts, CountingFilesystem};
pub use self::local::LocalFilesystem;
#[cfg(feature = "mock")]
pub use self::mock::MockFilesystem;
use crate::error::Result;
use crate::models::EntryKind;
use std::path::Path;

/// Read-only view of the application root.
///
/// All operations are synchronous; discovery happens once per cache miss and
/// touches a handful of small files.
///
/// # Path Handling
/// All paths are relative to the configured root and must be validated using
/// [`validate_path`](crate::validate_path) before use. Implementations
/// enforce this validation and report escapes as
/// [`InvalidPath`](crate::error::ErrorKind::InvalidPath).
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use swagger_ui_storage::{Filesystem, error::Result};
///
/// fn manifest_size(fs: &dyn Filesystem) -> Result<usize> {
///     let path = Path::new("libraries/swagger-ui/package.json");
///     if fs.is_file(path)? {
///         Ok(fs.read(path)?.len())
///     } else {
///         Ok(0)
///     }
/// }
/// ```
pub trait Filesystem: Send + Sync {
    /// Name of the configured backend, used for logging only.
    fn name(&self) -> &str;

    /// Report what the path points at, or `None` when nothing usable is there.
    ///
    /// Absence is not an error. Errors are reserved for invalid paths and
    /// for lookups that could not be answered (permissions, I/O).
    fn kind(&self, path: &Path) -> Result<Option<EntryKind>>;

    /// Read the complete contents of a file.
    ///
    /// Returns [`NotFound`](crate::error::ErrorKind::NotFound) if the file
    /// does not exist and [`NotAFile`](crate::error::ErrorKind::NotAFile) if
    /// the path is a directory.
    fn read(&self, path: &Path) -> Result<Vec<u8>>;

    /// Check if anything exists at the path.
    fn exists(&self, path: &Path) -> Result<bool> {
        Ok(self.kind(path)?.is_some())
    }

    /// Check if the path is an existing directory.
    fn is_dir(&self, path: &Path) -> Result<bool> {
        Ok(self.kind(path)?.is_some_and(|kind| kind.is_dir()))
    }

    /// Check if the path is an existing regular file.
    fn is_file(&self, path: &Path) -> Result<bool> {
        Ok(self.kind(path)?.is_some_and(|kind| kind.is_file()))
    }
}
