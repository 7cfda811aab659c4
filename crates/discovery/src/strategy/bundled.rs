//! Library bundled with the module at build time.

use crate::error::{ErrorKind, Result};
use crate::manifest::ManifestFile;
use crate::strategy::Strategy;
use crate::{Discovery, LibraryDiscovery};
use derive_more::Display;
use std::collections::BTreeMap;
use std::path::PathBuf;
use swagger_ui_config::{ExtensionsConfig, MODULE_NAME};

/// Subdirectory of the module that the bundling step writes the library to.
const FRONTEND_DIRECTORY: &str = "frontend";

#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExtensionKind {
    #[display("module")]
    Module,
    #[display("theme")]
    Theme,
    #[display("profile")]
    Profile,
}

/// Answers "where is this extension installed", relative to the application
/// root.
pub trait ExtensionPathResolver: Send + Sync {
    fn path(&self, kind: ExtensionKind, name: &str) -> Option<String>;
}

/// Extension paths known up front, typically from configuration.
#[derive(Clone, Debug, Default)]
pub struct StaticExtensionPaths {
    paths: BTreeMap<(ExtensionKind, String), String>,
}
impl StaticExtensionPaths {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, kind: ExtensionKind, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.paths.insert((kind, name.into()), path.into());
        self
    }
}
impl From<&ExtensionsConfig> for StaticExtensionPaths {
    fn from(config: &ExtensionsConfig) -> Self {
        let groups = [
            (ExtensionKind::Module, &config.module),
            (ExtensionKind::Theme, &config.theme),
            (ExtensionKind::Profile, &config.profile),
        ];
        let paths = groups
            .into_iter()
            .flat_map(|(kind, names)| names.iter().map(move |(name, path)| ((kind, name.clone()), path.clone())))
            .collect();
        Self { paths }
    }
}
impl ExtensionPathResolver for StaticExtensionPaths {
    fn path(&self, kind: ExtensionKind, name: &str) -> Option<String> {
        self.paths.get(&(kind, name.to_string())).cloned()
    }
}

/// Locates the copy of the library shipped in the module's `frontend`
/// directory and reads the version stamp written next to it.
pub struct BundledAssets {
    resolver: Box<dyn ExtensionPathResolver>,
}
impl BundledAssets {
    pub fn new(resolver: impl ExtensionPathResolver + 'static) -> Self {
        Self { resolver: Box::new(resolver) }
    }
}

impl Strategy for BundledAssets {
    fn name(&self) -> &'static str {
        "bundled"
    }

    fn locate_library(&self) -> Result<String> {
        let Some(module_path) = self.resolver.path(ExtensionKind::Module, MODULE_NAME) else {
            tracing::warn!(module = MODULE_NAME, "Module installation path is unknown");
            exn::bail!(ErrorKind::InvalidDirectory(PathBuf::from(MODULE_NAME).join(FRONTEND_DIRECTORY)));
        };
        Ok(format!("{}/{FRONTEND_DIRECTORY}", module_path.trim_end_matches('/')))
    }

    fn read_raw_version(&self, discovery: &Discovery) -> Result<String> {
        let directory = discovery.library_directory()?;
        ManifestFile::VersionInfo.read_version(discovery.filesystem(), &directory)
    }
}
