//! Swagger UI library discovery.
//!
//! Finds the Swagger UI distribution on disk, checks that it is complete and
//! recent enough, and remembers where it is.
//!
//! ```text
//! library_directory()
//!   ├─ cache hit ──────────────────────────────▶ location (no filesystem access)
//!   └─ miss ─▶ strategy.locate_library()
//!             ─▶ validate directory + required files
//!             ─▶ cache (permanent, tagged) ──▶ location
//!
//! library_version()
//!   └─ strategy.read_raw_version() ─▶ minimum version gate ─▶ raw version
//! ```
//!
//! Two [strategies](strategy) exist: a library [downloaded](DownloadedArtifact)
//! into a themeable libraries directory, and a copy [bundled](BundledAssets)
//! with the module. [`Discovery::from_config`] picks one at startup.

mod discovery;
pub mod error;
mod location;
mod manifest;
pub mod strategy;
mod version;

pub use crate::discovery::{CONFIGURATION_CID, Discovery, LIBRARY_PATH_CID, REQUIRED_FILES, THEME_CONFIG_TAG};
pub use crate::location::LibraryLocation;
pub use crate::manifest::ManifestFile;
pub use crate::strategy::{
    BundledAssets, DownloadedArtifact, ExtensionKind, ExtensionPathResolver, LibraryDirectoryAlter,
    StaticExtensionPaths, Strategy, Theme, ThemeChain,
};
pub use crate::version::{MIN_SUPPORTED_LIBRARY_VERSION, parse as parse_version};
use crate::error::Result;
use swagger_ui_cache::CacheableDependency;

/// What consumers of discovery get to see.
///
/// Kept as a trait so that a renderer can be handed a decorator or a test
/// double instead of a real [`Discovery`].
pub trait LibraryDiscovery: CacheableDependency + Send + Sync {
    /// Directory of a structurally valid library, relative to the
    /// application root.
    fn library_directory(&self) -> Result<LibraryLocation>;

    /// Raw version string of a library that meets
    /// [`MIN_SUPPORTED_LIBRARY_VERSION`]. Checked on every call.
    fn library_version(&self) -> Result<String>;

    /// Forget the cached directory. Safe to call when nothing is cached.
    fn reset(&self) -> Result<()>;

    /// Resolve both directory and version, folding any failure into a
    /// reportable status.
    fn status(&self) -> LibraryStatus {
        let resolved = self.library_directory().and_then(|directory| Ok((directory, self.library_version()?)));
        match resolved {
            Ok((directory, version)) => LibraryStatus::Available { directory, version },
            Err(err) => LibraryStatus::Unavailable { code: err.code(), reason: (*err).to_string() },
        }
    }
}

/// Outcome of a full library check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LibraryStatus {
    Available { directory: LibraryLocation, version: String },
    Unavailable { code: u8, reason: String },
}
impl LibraryStatus {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available { .. })
    }
}
