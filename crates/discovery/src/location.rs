use derive_more::{Deref, Display};
use std::path::Path;

/// Directory of a validated library installation, relative to the
/// application root and without a leading separator.
#[derive(Clone, Debug, Display, Deref, PartialEq, Eq, Hash)]
pub struct LibraryLocation(String);
impl LibraryLocation {
    /// Normalize a candidate location. Nothing is validated here; locations
    /// handed out by discovery have passed the required-files check.
    pub(crate) fn new(path: impl AsRef<str>) -> Self {
        Self(path.as_ref().trim_start_matches('/').to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }

    /// Path of a file inside the library directory.
    pub fn join(&self, file: &str) -> String {
        format!("{}/{file}", self.0)
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}
impl AsRef<Path> for LibraryLocation {
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}
