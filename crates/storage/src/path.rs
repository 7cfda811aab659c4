//! Path validation.
//!
//! Every path a [`Filesystem`](crate::Filesystem) sees is relative to the
//! application root. Themes and configuration are free to hand us whatever
//! string they like, so paths are normalized here and anything that would
//! climb out of the root is rejected.

use std::path::{Component, Path, PathBuf};

use crate::error::{ErrorKind, Result};

/// Validates and normalizes a root-relative path.
///
/// Leading separators are dropped (`/libraries/swagger-ui` is the same as
/// `libraries/swagger-ui`), `.` components and repeated separators vanish, and
/// `..` is resolved as long as it never leaves the root. A path that resolves
/// to the root itself is rejected as well: there is never a reason to look at
/// the root directly.
///
/// Backslashes are not treated as separators. NUL bytes are rejected.
///
/// ```
/// use std::path::Path;
/// use swagger_ui_storage::validate_path;
///
/// assert!(validate_path("libraries/swagger-ui").is_ok());
/// assert!(validate_path("modules/../libraries/swagger-ui").is_ok());
/// assert!(validate_path("../swagger-ui").is_err());
/// assert!(validate_path("libraries\0swagger-ui").is_err());
/// assert_eq!(
///     validate_path("/my/custom//./path/to/swagger-ui/").unwrap(),
///     Path::new("my/custom/path/to/swagger-ui")
/// );
/// ```
pub fn validate(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let invalid = || ErrorKind::InvalidPath(path.to_path_buf());
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            // NUL survives Path::components() on Unix but truncates in syscalls.
            Component::Normal(segment) if segment.as_encoded_bytes().contains(&0) => exn::bail!(invalid()),
            Component::Normal(segment) => normalized.push(segment),
            Component::ParentDir if !normalized.pop() => exn::bail!(invalid()),
            Component::ParentDir | Component::CurDir | Component::RootDir => {},
            Component::Prefix(_) => exn::bail!(invalid()),
        }
    }
    if normalized.as_os_str().is_empty() {
        exn::bail!(invalid());
    }
    Ok(normalized)
}
