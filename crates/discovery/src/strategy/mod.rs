//! Where the library lives, and where its version is written down.
//!
//! The discovery base owns caching, validation and the version gate; a
//! [`Strategy`] only answers the two questions that depend on how the library
//! was installed.

mod bundled;
mod downloaded;

pub use self::bundled::{BundledAssets, ExtensionKind, ExtensionPathResolver, StaticExtensionPaths};
pub use self::downloaded::{DownloadedArtifact, LibraryDirectoryAlter, Theme, ThemeChain};
use crate::Discovery;
use crate::error::Result;

pub trait Strategy: Send + Sync {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// Compute the candidate library directory, relative to the application
    /// root. Called once per cache miss; the result is validated by the base.
    fn locate_library(&self) -> Result<String>;

    /// Read the raw (unchecked) version string. Implementations resolve the
    /// library directory through `discovery` first, which caches it.
    fn read_raw_version(&self, discovery: &Discovery) -> Result<String>;
}
