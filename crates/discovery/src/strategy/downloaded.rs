//! Library downloaded by hand into a (themeable) libraries directory.

use crate::error::Result;
use crate::manifest::ManifestFile;
use crate::strategy::Strategy;
use crate::{Discovery, LibraryDiscovery};
use swagger_ui_config::ThemeConfig;

/// Rewrites the library directory before it is validated.
///
/// Implemented for closures, so an embedding application can pass
/// `|dir: &mut String| ...` directly.
pub trait LibraryDirectoryAlter: Send + Sync {
    fn alter(&self, directory: &mut String);
}
impl<F> LibraryDirectoryAlter for F
where
    F: Fn(&mut String) + Send + Sync,
{
    fn alter(&self, directory: &mut String) {
        self(directory)
    }
}

/// One theme in a [`ThemeChain`], with its optional alteration.
pub struct Theme {
    name: String,
    alter: Option<Box<dyn LibraryDirectoryAlter>>,
}
impl Theme {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), alter: None }
    }

    pub fn with_alter(mut self, alter: impl LibraryDirectoryAlter + 'static) -> Self {
        self.alter = Some(Box::new(alter));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
impl From<&ThemeConfig> for Theme {
    fn from(config: &ThemeConfig) -> Self {
        let theme = Self::new(config.name.clone());
        match config.library_directory.clone() {
            Some(directory) => theme.with_alter(move |current: &mut String| *current = directory.clone()),
            None => theme,
        }
    }
}

/// The default theme together with its base themes.
///
/// Themes are stored outermost base theme first and the active theme last,
/// and are invoked in that order, so the active theme has the final say.
#[derive(Default)]
pub struct ThemeChain {
    themes: Vec<Theme>,
}
impl ThemeChain {
    pub fn new(themes: impl IntoIterator<Item = Theme>) -> Self {
        Self { themes: themes.into_iter().collect() }
    }

    pub fn from_config(themes: &[ThemeConfig]) -> Self {
        Self::new(themes.iter().map(Theme::from))
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}
impl LibraryDirectoryAlter for ThemeChain {
    fn alter(&self, directory: &mut String) {
        for theme in &self.themes {
            if let Some(alter) = &theme.alter {
                alter.alter(directory);
                tracing::trace!(theme = %theme.name, directory = %directory, "Theme altered library directory");
            }
        }
    }
}

/// Locates a library at `libraries/swagger-ui` (or wherever the theme chain
/// moves it) and reads the version from its `package.json`.
pub struct DownloadedArtifact {
    default_directory: String,
    alter: Box<dyn LibraryDirectoryAlter>,
}
impl DownloadedArtifact {
    pub fn new(default_directory: impl Into<String>, alter: impl LibraryDirectoryAlter + 'static) -> Self {
        Self::boxed(default_directory, Box::new(alter))
    }

    pub fn boxed(default_directory: impl Into<String>, alter: Box<dyn LibraryDirectoryAlter>) -> Self {
        Self { default_directory: default_directory.into(), alter }
    }
}

impl Strategy for DownloadedArtifact {
    fn name(&self) -> &'static str {
        "downloaded"
    }

    fn locate_library(&self) -> Result<String> {
        let mut directory = self.default_directory.clone();
        self.alter.alter(&mut directory);
        if directory != self.default_directory {
            tracing::debug!(default = %self.default_directory, altered = %directory, "Library directory altered");
        }
        Ok(directory.trim_start_matches('/').to_string())
    }

    fn read_raw_version(&self, discovery: &Discovery) -> Result<String> {
        let directory = discovery.library_directory()?;
        ManifestFile::PackageJson.read_version(discovery.filesystem(), &directory)
    }
}
