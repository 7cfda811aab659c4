//! Discovery base: caching, validation and the version gate.

use crate::error::{ErrorKind, Result};
use crate::location::LibraryLocation;
use crate::strategy::{BundledAssets, DownloadedArtifact, LibraryDirectoryAlter, StaticExtensionPaths, Strategy, ThemeChain};
use crate::{LibraryDiscovery, version};
use exn::ResultExt;
use std::path::{Path, PathBuf};
use swagger_ui_cache::{CacheHandle, CacheableDependency, CacheableMetadata, MaxAge};
use swagger_ui_config::{DiscoveryConfig, DiscoveryMethod};
use swagger_ui_storage::error::ErrorKind as StorageErrorKind;
use swagger_ui_storage::{EntryKind, Filesystem, FilesystemHandle};
use tracing::instrument;

/// Cache key of the library directory. Doubles as its own cache tag.
pub const LIBRARY_PATH_CID: &str = "swagger_ui_formatter:library_path";
/// Tag invalidated whenever the default theme configuration changes.
pub const THEME_CONFIG_TAG: &str = "config:system.theme";
/// Cache key of the configuration the cached directory was resolved under.
pub const CONFIGURATION_CID: &str = "swagger_ui_formatter:configuration";
/// Files every library directory must contain, checked in this order.
pub const REQUIRED_FILES: [&str; 5] = [
    "package.json",
    "dist/swagger-ui.css",
    "dist/swagger-ui-bundle.js",
    "dist/swagger-ui-standalone-preset.js",
    "dist/oauth2-redirect.html",
];
const CACHE_TAGS: [&str; 2] = [LIBRARY_PATH_CID, THEME_CONFIG_TAG];

/// Library discovery service.
///
/// Shareable behind an [`Arc`](std::sync::Arc). Concurrent first resolutions
/// are not coalesced: each validates and writes the same value.
pub struct Discovery {
    strategy: Box<dyn Strategy>,
    cache: CacheHandle,
    filesystem: FilesystemHandle,
}
impl Discovery {
    pub fn new(strategy: impl Strategy + 'static, cache: CacheHandle, filesystem: FilesystemHandle) -> Self {
        Self { strategy: Box::new(strategy), cache, filesystem }
    }

    /// Build the service for the configured discovery method.
    ///
    /// For downloaded libraries, `alter` takes precedence over the theme chain
    /// described in configuration. Bundled libraries are never altered.
    pub fn from_config(
        config: &DiscoveryConfig,
        cache: CacheHandle,
        filesystem: FilesystemHandle,
        alter: Option<Box<dyn LibraryDirectoryAlter>>,
    ) -> Self {
        let strategy: Box<dyn Strategy> = match config.method {
            DiscoveryMethod::Downloaded => {
                let alter = alter
                    .unwrap_or_else(|| Box::new(ThemeChain::from_config(&config.themes)) as Box<dyn LibraryDirectoryAlter>);
                Box::new(DownloadedArtifact::boxed(config.library_directory.clone(), alter))
            },
            DiscoveryMethod::Bundled => Box::new(BundledAssets::new(StaticExtensionPaths::from(&config.extensions))),
        };
        tracing::debug!(strategy = strategy.name(), "Selected library discovery strategy");
        Self { strategy, cache, filesystem }
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn filesystem(&self) -> &dyn Filesystem {
        self.filesystem.as_ref()
    }

    /// Expire every cache entry carrying any of the tags, the cached library
    /// directory included when one of its tags is given.
    #[instrument(skip(self))]
    pub fn invalidate_tags(&self, tags: &[&str]) -> Result<usize> {
        let removed = self.cache.invalidate_tags(tags).or_raise(|| ErrorKind::Cache)?;
        tracing::info!(removed, "Invalidated cache tags");
        Ok(removed)
    }

    /// Record the configuration (application root, discovery settings) that
    /// resolution runs under.
    ///
    /// A persistent cache outlives the process and may be shared by several
    /// roots. When `fingerprint` differs from the recorded one, everything
    /// tagged [`THEME_CONFIG_TAG`] is invalidated before the new fingerprint is
    /// stored. Returns whether the configuration changed.
    #[instrument(skip_all)]
    pub fn track_configuration(&self, fingerprint: &str) -> Result<bool> {
        let recorded = self.cache.get(CONFIGURATION_CID).or_raise(|| ErrorKind::Cache)?;
        if recorded.is_some_and(|entry| entry.value == fingerprint) {
            return Ok(false);
        }
        let removed = self.invalidate_tags(&[THEME_CONFIG_TAG])?;
        self.cache
            .set(CONFIGURATION_CID, fingerprint, MaxAge::Permanent, &[])
            .or_raise(|| ErrorKind::Cache)?;
        tracing::info!(removed, "Discovery configuration changed");
        Ok(true)
    }

    fn validate(&self, location: &LibraryLocation) -> Result<()> {
        let directory = location.as_path();
        match self.lookup(directory)? {
            Some(EntryKind::Directory) => {},
            _ => exn::bail!(ErrorKind::InvalidDirectory(directory.to_path_buf())),
        }
        for file in REQUIRED_FILES {
            let path = directory.join(file);
            if !self.lookup(&path)?.is_some_and(|kind| kind.is_file()) {
                exn::bail!(ErrorKind::RequiredFileMissing(path));
            }
        }
        Ok(())
    }

    /// Filesystem lookup where a path escaping the root counts as invalid
    /// rather than as a storage failure.
    fn lookup(&self, path: &Path) -> Result<Option<EntryKind>> {
        match self.filesystem.kind(path) {
            Ok(kind) => Ok(kind),
            Err(e) if matches!(&*e, StorageErrorKind::InvalidPath(_)) => {
                Err(e).or_raise(|| ErrorKind::InvalidDirectory(PathBuf::from(path)))
            },
            Err(e) => Err(e).or_raise(|| ErrorKind::Storage),
        }
    }
}

impl LibraryDiscovery for Discovery {
    #[instrument(skip(self), fields(strategy = self.strategy.name()))]
    fn library_directory(&self) -> Result<LibraryLocation> {
        if let Some(entry) = self.cache.get(LIBRARY_PATH_CID).or_raise(|| ErrorKind::Cache)? {
            tracing::debug!(directory = %entry.value, "Library directory cache hit");
            return Ok(LibraryLocation::new(entry.value));
        }
        tracing::debug!("Library directory cache miss");
        let location = LibraryLocation::new(self.strategy.locate_library()?);
        self.validate(&location)?;
        let metadata = self.cacheability();
        let tags: Vec<&str> = metadata.tags.iter().map(String::as_str).collect();
        self.cache
            .set(LIBRARY_PATH_CID, location.as_str(), metadata.max_age, &tags)
            .or_raise(|| ErrorKind::Cache)?;
        tracing::info!(directory = %location, backend = self.cache.name(), "Cached library directory");
        Ok(location)
    }

    #[instrument(skip(self), fields(strategy = self.strategy.name()))]
    fn library_version(&self) -> Result<String> {
        let raw = self.strategy.read_raw_version(self)?;
        version::ensure_supported(raw)
    }

    fn reset(&self) -> Result<()> {
        self.cache.delete(LIBRARY_PATH_CID).or_raise(|| ErrorKind::Cache)?;
        tracing::info!("Library directory cache entry deleted");
        Ok(())
    }
}

impl CacheableDependency for Discovery {
    fn cacheability(&self) -> CacheableMetadata {
        CacheableMetadata::new().with_tags(CACHE_TAGS).with_max_age(MaxAge::Permanent)
    }
}
