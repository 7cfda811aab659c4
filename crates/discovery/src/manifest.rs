//! Version manifests.
//!
//! A downloaded library carries its own `package.json`; a bundled copy carries
//! a version stamp written by the bundling step. Both are JSON objects with a
//! single field of interest.

use crate::error::{ErrorKind, Result};
use derive_more::Display;
use exn::ResultExt;
use serde_json::Value;
use std::path::{Path, PathBuf};
use swagger_ui_storage::Filesystem;

/// The file a strategy reads its version from.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum ManifestFile {
    /// The library's own packaging manifest.
    #[display("package.json")]
    PackageJson,
    /// The stamp generated when the library is bundled with the module.
    #[display("version info")]
    VersionInfo,
}
impl ManifestFile {
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::PackageJson => "package.json",
            Self::VersionInfo => "swagger_ui_version.json",
        }
    }

    pub fn version_field(&self) -> &'static str {
        match self {
            Self::PackageJson => "version",
            Self::VersionInfo => "swagger-ui-version",
        }
    }

    /// Location of this manifest inside a library directory.
    pub fn path_in(&self, directory: impl AsRef<Path>) -> PathBuf {
        directory.as_ref().join(self.file_name())
    }

    /// Read the raw version string from the manifest in `directory`.
    ///
    /// String values are returned as-is and numbers as their decimal text.
    /// A `null`, any other type, or a document that is not an object counts
    /// as a missing version.
    pub fn read_version(&self, fs: &dyn Filesystem, directory: impl AsRef<Path>) -> Result<String> {
        let path = self.path_in(directory);
        let content = fs.read(&path).or_raise(|| ErrorKind::ManifestUnreadable(*self, path.clone()))?;
        if content.is_empty() {
            exn::bail!(ErrorKind::ManifestUnreadable(*self, path));
        }
        let data: Value = match serde_json::from_slice(&content) {
            Ok(data) => data,
            Err(e) => exn::bail!(ErrorKind::ManifestUndecodable { file: *self, path, message: e.to_string() }),
        };
        match data.get(self.version_field()) {
            Some(Value::String(version)) => Ok(version.clone()),
            Some(Value::Number(version)) => Ok(version.to_string()),
            _ => exn::bail!(ErrorKind::VersionFieldMissing(path)),
        }
    }
}
