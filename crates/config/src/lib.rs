//! Layered configuration.
//!
//! Values are resolved in order, later layers winning:
//!
//! 1. built-in defaults (serde `default` attributes),
//! 2. an optional configuration file, format chosen by extension,
//! 3. environment variables prefixed `SWAGGER_UI_`, nested keys split on `__`
//!    (e.g. `SWAGGER_UI_DISCOVERY__METHOD=bundled`).
//!
//! The extracted configuration is validated before it is handed out.

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Toml, Yaml};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const ENV_PREFIX: &str = "SWAGGER_UI_";
pub const DEFAULT_LIBRARY_DIRECTORY: &str = "libraries/swagger-ui";
pub const MODULE_NAME: &str = "swagger_ui_formatter";
const DEFAULT_MODULE_PATH: &str = "modules/contrib/swagger_ui_formatter";
const CACHE_FILE_NAME: &str = "cache.json";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "swagger-ui", "swagger-ui-formatter")
}

/// Where the Swagger UI library is expected to come from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscoveryMethod {
    /// Downloaded separately into the libraries directory.
    #[default]
    Downloaded,
    /// Shipped inside the module's `frontend` directory.
    Bundled,
}

/// A theme in the active theme chain.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub name: String,
    /// Directory this theme substitutes for the library directory, if any.
    pub library_directory: Option<String>,
}

/// Installation paths of extensions, relative to the application root.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionsConfig {
    pub module: BTreeMap<String, String>,
    pub theme: BTreeMap<String, String>,
    pub profile: BTreeMap<String, String>,
}
impl Default for ExtensionsConfig {
    fn default() -> Self {
        Self {
            module: BTreeMap::from([(MODULE_NAME.to_string(), DEFAULT_MODULE_PATH.to_string())]),
            theme: BTreeMap::new(),
            profile: BTreeMap::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    pub method: DiscoveryMethod,
    /// Default location of a downloaded library, before theme alteration.
    pub library_directory: String,
    /// Active theme chain, outermost base theme first, active theme last.
    pub themes: Vec<ThemeConfig>,
    pub extensions: ExtensionsConfig,
}
impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            method: DiscoveryMethod::default(),
            library_directory: DEFAULT_LIBRARY_DIRECTORY.to_string(),
            themes: Vec::new(),
            extensions: ExtensionsConfig::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackendKind {
    Memory,
    #[default]
    File,
    None,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub backend: CacheBackendKind,
    /// Cache file for the `file` backend. Defaults to the per-user cache
    /// directory.
    pub path: Option<PathBuf>,
}
impl CacheConfig {
    /// Cache file location for the `file` backend.
    pub fn file_path(&self) -> Option<PathBuf> {
        self.path.clone().or_else(|| project_dirs().map(|dirs| dirs.cache_dir().join(CACHE_FILE_NAME)))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Application root that every library path is relative to.
    pub root: PathBuf,
    pub discovery: DiscoveryConfig,
    pub cache: CacheConfig,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            root: std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/")),
            discovery: DiscoveryConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl Config {
    /// Per-user configuration file, used when no file is given explicitly
    /// and it exists.
    pub fn default_file() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Build the layered figment without extracting it.
    pub fn figment(file: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::new();
        let file = match file {
            Some(file) if !file.is_file() => exn::bail!(ErrorKind::NotFound(file.to_path_buf())),
            Some(file) => Some(file.to_path_buf()),
            None => Self::default_file().filter(|file| file.is_file()),
        };
        if let Some(file) = file {
            tracing::debug!(path = %file.display(), "Loading configuration file");
            let extension = file.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase);
            figment = match extension.as_deref() {
                Some("toml") => figment.merge(Toml::file_exact(&file)),
                Some("yaml" | "yml") => figment.merge(Yaml::file_exact(&file)),
                Some("json") => figment.merge(Json::file_exact(&file)),
                _ => exn::bail!(ErrorKind::UnsupportedFormat(file)),
            };
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Load and validate configuration.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        Self::from_figment(Self::figment(file)?)
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: Self = figment.extract().or_raise(|| ErrorKind::Extract)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.root.is_absolute() {
            exn::bail!(ErrorKind::Invalid("root", format!("{} is not an absolute path", self.root.display())));
        }
        if self.discovery.method == DiscoveryMethod::Downloaded && self.discovery.library_directory.trim().is_empty() {
            exn::bail!(ErrorKind::Invalid("discovery.library_directory", "must not be empty".to_string()));
        }
        if let Some(theme) = self.discovery.themes.iter().find(|theme| theme.name.is_empty()) {
            exn::bail!(ErrorKind::Invalid("discovery.themes", format!("theme without a name: {theme:?}")));
        }
        if self.cache.backend == CacheBackendKind::File && self.cache.file_path().is_none() {
            exn::bail!(ErrorKind::Invalid("cache.path", "no path given and no cache directory available".to_string()));
        }
        Ok(())
    }
}
