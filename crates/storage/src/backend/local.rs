//! Local filesystem backend.
//!
//! Resolves every relative path against a fixed application root (the
//! directory the web server serves from) using blocking `std::fs` calls.

use crate::error::{ErrorKind, Result};
use crate::{EntryKind, Filesystem, path::validate as validate_path};
use std::fs;
use std::path::{Path, PathBuf};

/// Local filesystem backend.
///
/// # Examples
///
/// ```no_run
/// use swagger_ui_storage::backend::LocalFilesystem;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let fs = LocalFilesystem::new("docroot", "/var/www/html")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct LocalFilesystem {
    name: String,
    /// Application root directory
    root: PathBuf,
}
impl LocalFilesystem {
    /// Create a new local filesystem backend.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPath`](ErrorKind::InvalidPath) if the root is not
    /// absolute or is not an existing directory. Unlike library directories,
    /// the root itself is never created.
    pub fn new(name: impl Into<String>, root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_absolute() || !root.is_dir() {
            exn::bail!(ErrorKind::InvalidPath(root));
        }
        Ok(Self { name: name.into(), root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the absolute path for a relative path.
    fn absolute_path(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let validated = validate_path(path.as_ref())?;
        Ok(self.root.join(validated))
    }

    fn map_io_error(e: std::io::Error, path: &Path) -> ErrorKind {
        match e.kind() {
            std::io::ErrorKind::NotFound | std::io::ErrorKind::NotADirectory => ErrorKind::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied(path.to_path_buf()),
            std::io::ErrorKind::IsADirectory => ErrorKind::NotAFile(path.to_path_buf()),
            _ => ErrorKind::Io(e),
        }
    }
}

impl Filesystem for LocalFilesystem {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self, path: &Path) -> Result<Option<EntryKind>> {
        let abs_path = self.absolute_path(path)?;
        // Follows symlinks; a dangling link counts as absent, and so does
        // anything below a regular file.
        match fs::metadata(&abs_path) {
            Ok(meta) if meta.is_dir() => Ok(Some(EntryKind::Directory)),
            Ok(meta) if meta.is_file() => Ok(Some(EntryKind::File)),
            Ok(_) => Ok(None),
            Err(e) if matches!(e.kind(), std::io::ErrorKind::NotFound | std::io::ErrorKind::NotADirectory) => Ok(None),
            Err(e) => Err(Self::map_io_error(e, path).into()),
        }
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let abs_path = self.absolute_path(path)?;
        if abs_path.is_dir() {
            exn::bail!(ErrorKind::NotAFile(path.to_path_buf()));
        }
        Ok(fs::read(&abs_path).map_err(|e| Self::map_io_error(e, path))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (tempfile::TempDir, LocalFilesystem) {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp_dir.path().join("libraries/swagger-ui/dist")).unwrap();
        fs::write(temp_dir.path().join("libraries/swagger-ui/package.json"), br#"{"version":"5.0.0"}"#).unwrap();
        let backend = LocalFilesystem::new("docroot", temp_dir.path()).unwrap();
        (temp_dir, backend)
    }

    #[test]
    fn test_new_requires_absolute_existing_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(LocalFilesystem::new("docroot", temp_dir.path()).is_ok());
        assert!(LocalFilesystem::new("docroot", "relative/path").is_err());
        assert!(LocalFilesystem::new("docroot", temp_dir.path().join("missing")).is_err());
        let file = temp_dir.path().join("file.txt");
        fs::write(&file, b"data").unwrap();
        assert!(LocalFilesystem::new("docroot", &file).is_err());
    }

    #[test]
    fn test_kind() {
        let (_dir, backend) = fixture();
        assert_eq!(backend.kind(Path::new("libraries/swagger-ui")).unwrap(), Some(EntryKind::Directory));
        assert_eq!(backend.kind(Path::new("libraries/swagger-ui/package.json")).unwrap(), Some(EntryKind::File));
        assert_eq!(backend.kind(Path::new("libraries/missing")).unwrap(), None);
        assert!(backend.is_dir(Path::new("/libraries/swagger-ui/dist/")).unwrap());
        assert!(!backend.is_file(Path::new("libraries/swagger-ui/dist")).unwrap());
    }

    #[test]
    fn test_read() {
        let (_dir, backend) = fixture();
        let data = backend.read(Path::new("libraries/swagger-ui/package.json")).unwrap();
        assert_eq!(data, br#"{"version":"5.0.0"}"#);
    }

    #[test]
    fn test_read_not_found() {
        let (_dir, backend) = fixture();
        let err = backend.read(Path::new("libraries/swagger-ui/missing.json")).unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(_)));
    }

    #[test]
    fn test_read_directory() {
        let (_dir, backend) = fixture();
        let err = backend.read(Path::new("libraries/swagger-ui/dist")).unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotAFile(_)));
    }

    #[test]
    fn test_below_a_regular_file() {
        let (dir, backend) = fixture();
        fs::write(dir.path().join("libraries/swagger-ui/LICENSE"), b"MIT").unwrap();
        let nested = Path::new("libraries/swagger-ui/LICENSE/swagger-ui.css");
        assert_eq!(backend.kind(nested).unwrap(), None);
        let err = backend.read(nested).unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(_)), "{err:?}");
    }

    #[test]
    fn test_path_security() {
        let (_dir, backend) = fixture();
        assert!(backend.kind(Path::new("../etc/passwd")).is_err());
        assert!(backend.read(Path::new("libraries/../../passwd")).is_err());
    }
}
