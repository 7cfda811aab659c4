//! Command line front-end.

use crate::error::{ErrorKind, Result};
use clap::{ArgAction, Parser, Subcommand};
use exn::{OptionExt, ResultExt};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use swagger_ui_cache::{CacheHandle, FileCache, MemoryCache, NullCache};
use swagger_ui_config::{CacheBackendKind, Config};
use swagger_ui_discovery::error::Error as DiscoveryError;
use swagger_ui_discovery::{Discovery, LibraryDiscovery, LibraryStatus};
use swagger_ui_render::{FormatterSettings, Output};
use swagger_ui_storage::backend::LocalFilesystem;

#[derive(Debug, Parser)]
#[command(name = "swagger-ui-formatter", version, about = "Locate, validate and configure a Swagger UI library installation")]
pub struct Cli {
    /// Configuration file (toml, yaml or json)
    #[arg(short, long, global = true, env = "SWAGGER_UI_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Application root, overriding the configured one
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check the library and report its location and version
    Status,
    /// Print the library directory
    Directory,
    /// Print the library version
    Version,
    /// Forget the cached library directory
    Reset,
    /// Invalidate cache tags (e.g. after the default theme changed)
    Invalidate {
        #[arg(required = true, value_name = "TAG")]
        tags: Vec<String>,
    },
    /// Print the configuration of one Swagger UI instance per document URL
    Configure {
        /// Field name used to key the instances
        #[arg(long, value_name = "NAME")]
        field: String,
        /// Scheme and host the library is served from
        #[arg(long, value_name = "URL", default_value = "http://localhost")]
        base_url: String,
        /// Formatter settings (JSON); defaults apply to anything left out
        #[arg(long, value_name = "FILE")]
        settings: Option<PathBuf>,
        /// Document URLs; an empty string marks an item without a URL
        #[arg(value_name = "URL")]
        urls: Vec<String>,
    },
    /// Print the summary of formatter settings
    Summary {
        #[arg(long, value_name = "FILE")]
        settings: Option<PathBuf>,
    },
}

/// How a successful run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// The library is missing, broken or too old.
    Unavailable,
}
impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::Unavailable => ExitCode::from(1),
        }
    }
}

pub fn run(cli: Cli, out: &mut dyn Write) -> Result<Outcome> {
    if let Command::Summary { settings } = &cli.command {
        let settings = load_settings(settings.as_deref())?;
        writeln!(out, "{}", settings.summary()).or_raise(|| ErrorKind::Output)?;
        return Ok(Outcome::Success);
    }

    let mut config = Config::load(cli.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    if let Some(root) = cli.root {
        config.root = root;
        config.validate().or_raise(|| ErrorKind::Config)?;
    }
    let discovery = discovery(&config)?;

    match cli.command {
        Command::Status => match discovery.status() {
            LibraryStatus::Available { directory, version } => {
                writeln!(out, "Swagger UI {version} found in {directory} ({})", discovery.strategy_name())
                    .or_raise(|| ErrorKind::Output)?;
                Ok(Outcome::Success)
            },
            LibraryStatus::Unavailable { code, reason } => {
                tracing::debug!(code, "Library unavailable");
                eprintln!("{reason}");
                Ok(Outcome::Unavailable)
            },
        },
        Command::Directory => match discovery.library_directory() {
            Ok(directory) => {
                writeln!(out, "{directory}").or_raise(|| ErrorKind::Output)?;
                Ok(Outcome::Success)
            },
            Err(err) => Ok(unavailable(&err)),
        },
        Command::Version => match discovery.library_version() {
            Ok(version) => {
                writeln!(out, "{version}").or_raise(|| ErrorKind::Output)?;
                Ok(Outcome::Success)
            },
            Err(err) => Ok(unavailable(&err)),
        },
        Command::Reset => match discovery.reset() {
            Ok(()) => {
                writeln!(out, "Library directory cache entry deleted.").or_raise(|| ErrorKind::Output)?;
                Ok(Outcome::Success)
            },
            Err(err) => Err(err).or_raise(|| ErrorKind::Cache),
        },
        Command::Invalidate { tags } => {
            let tags: Vec<&str> = tags.iter().map(String::as_str).collect();
            let removed = discovery.invalidate_tags(&tags).or_raise(|| ErrorKind::Cache)?;
            writeln!(out, "{removed} cache entries invalidated.").or_raise(|| ErrorKind::Output)?;
            Ok(Outcome::Success)
        },
        Command::Configure { field, base_url, settings, urls } => {
            let settings = load_settings(settings.as_deref())?;
            let urls: Vec<Option<String>> = urls.into_iter().map(|url| Some(url).filter(|url| !url.is_empty())).collect();
            let rendered = swagger_ui_render::build(&discovery, &settings, &field, &urls, &base_url);
            let json = rendered.to_json().or_raise(|| ErrorKind::Output)?;
            writeln!(out, "{json}").or_raise(|| ErrorKind::Output)?;
            match rendered.output {
                Output::Available { .. } => Ok(Outcome::Success),
                Output::Unavailable { .. } => Ok(Outcome::Unavailable),
            }
        },
        Command::Summary { .. } => Ok(Outcome::Success),
    }
}

fn unavailable(err: &DiscoveryError) -> Outcome {
    tracing::debug!(error = ?err, "Discovery failed");
    eprintln!("{}", **err);
    Outcome::Unavailable
}

fn discovery(config: &Config) -> Result<Discovery> {
    let filesystem = LocalFilesystem::new("root", &config.root).or_raise(|| ErrorKind::Root(config.root.clone()))?;
    let cache: CacheHandle = match config.cache.backend {
        CacheBackendKind::Memory => Arc::new(MemoryCache::new()),
        CacheBackendKind::None => Arc::new(NullCache),
        CacheBackendKind::File => {
            let path = config.cache.file_path().ok_or_raise(|| ErrorKind::Cache)?;
            Arc::new(FileCache::new(path).or_raise(|| ErrorKind::Cache)?)
        },
    };
    tracing::debug!(root = %config.root.display(), cache = cache.name(), "Discovery configured");
    let discovery = Discovery::from_config(&config.discovery, cache, Arc::new(filesystem), None);
    // A file cache is shared by every root and configuration it is used with.
    let fingerprint = serde_json::to_string(&(&config.root, &config.discovery)).or_raise(|| ErrorKind::Config)?;
    discovery.track_configuration(&fingerprint).or_raise(|| ErrorKind::Cache)?;
    Ok(discovery)
}

fn load_settings(path: Option<&Path>) -> Result<FormatterSettings> {
    let Some(path) = path else {
        return Ok(FormatterSettings::default());
    };
    let data = std::fs::read(path).or_raise(|| ErrorKind::Settings(path.to_path_buf()))?;
    serde_json::from_slice(&data).or_raise(|| ErrorKind::Settings(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use swagger_ui_discovery::REQUIRED_FILES;

    /// An application root with a downloaded library, plus a configuration
    /// file using a file cache inside the same temporary directory.
    fn fixture(version: &str) -> (tempfile::TempDir, PathBuf) {
        let temp_dir = tempfile::tempdir().unwrap();
        let library = temp_dir.path().join("root/libraries/swagger-ui");
        fs::create_dir_all(library.join("dist")).unwrap();
        for file in REQUIRED_FILES {
            fs::write(library.join(file), "/* asset */").unwrap();
        }
        fs::write(library.join("package.json"), format!(r#"{{"version": "{version}"}}"#)).unwrap();
        let config = temp_dir.path().join("config.json");
        let contents = serde_json::json!({
            "root": temp_dir.path().join("root"),
            "cache": {"backend": "file", "path": temp_dir.path().join("cache/cache.json")},
        });
        fs::write(&config, contents.to_string()).unwrap();
        (temp_dir, config)
    }

    fn run_args(args: &[&str]) -> (Outcome, String) {
        let cli = Cli::try_parse_from(args).unwrap();
        let mut out = Vec::new();
        let outcome = run(cli, &mut out).unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_parse() {
        let cli = Cli::try_parse_from(["swagger-ui-formatter", "-vv", "invalidate", "config:system.theme"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::Invalidate { ref tags } if tags == &["config:system.theme"]));
        assert!(Cli::try_parse_from(["swagger-ui-formatter", "invalidate"]).is_err());
        assert!(Cli::try_parse_from(["swagger-ui-formatter", "configure", "https://example.com/a.json"]).is_err());
    }

    #[test]
    fn test_status_directory_version() {
        let (_dir, config) = fixture("5.17.14");
        let config = config.to_str().unwrap();
        let (outcome, out) = run_args(&["swagger-ui-formatter", "-c", config, "status"]);
        assert_eq!(outcome, Outcome::Success);
        assert_eq!(out, "Swagger UI 5.17.14 found in libraries/swagger-ui (downloaded)\n");

        let (_, out) = run_args(&["swagger-ui-formatter", "-c", config, "directory"]);
        assert_eq!(out, "libraries/swagger-ui\n");
        let (_, out) = run_args(&["swagger-ui-formatter", "-c", config, "version"]);
        assert_eq!(out, "5.17.14\n");
    }

    #[test]
    fn test_unsupported_version() {
        let (_dir, config) = fixture("4.14.999");
        let config = config.to_str().unwrap();
        let (outcome, out) = run_args(&["swagger-ui-formatter", "-c", config, "version"]);
        assert_eq!(outcome, Outcome::Unavailable);
        assert!(out.is_empty());
        // The directory itself is valid.
        let (outcome, _) = run_args(&["swagger-ui-formatter", "-c", config, "directory"]);
        assert_eq!(outcome, Outcome::Success);
    }

    #[test]
    fn test_cache_is_shared_between_runs() {
        let (dir, config) = fixture("5.17.14");
        let config = config.to_str().unwrap();
        run_args(&["swagger-ui-formatter", "-c", config, "directory"]);
        // Removing a required file goes unnoticed while the location is cached.
        fs::remove_file(dir.path().join("root/libraries/swagger-ui/dist/swagger-ui.css")).unwrap();
        let (outcome, _) = run_args(&["swagger-ui-formatter", "-c", config, "directory"]);
        assert_eq!(outcome, Outcome::Success);

        let (_, out) = run_args(&["swagger-ui-formatter", "-c", config, "invalidate", "config:system.theme"]);
        assert_eq!(out, "1 cache entries invalidated.\n");
        let (outcome, _) = run_args(&["swagger-ui-formatter", "-c", config, "directory"]);
        assert_eq!(outcome, Outcome::Unavailable);
    }

    #[test]
    fn test_reset() {
        let (_dir, config) = fixture("5.17.14");
        let config = config.to_str().unwrap();
        run_args(&["swagger-ui-formatter", "-c", config, "directory"]);
        let (outcome, out) = run_args(&["swagger-ui-formatter", "-c", config, "reset"]);
        assert_eq!(outcome, Outcome::Success);
        assert_eq!(out, "Library directory cache entry deleted.\n");
        let (_, out) = run_args(&["swagger-ui-formatter", "-c", config, "invalidate", "swagger_ui_formatter:library_path"]);
        assert_eq!(out, "0 cache entries invalidated.\n");
    }

    #[test]
    fn test_configure() {
        let (_dir, config) = fixture("5.17.14");
        let config = config.to_str().unwrap();
        let (outcome, out) = run_args(&[
            "swagger-ui-formatter",
            "-c",
            config,
            "configure",
            "--field",
            "field_api",
            "--base-url",
            "https://example.com",
            "https://example.com/petstore.yaml",
            "",
        ]);
        assert_eq!(outcome, Outcome::Success);
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        let items = json["output"]["items"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["key"], "field_api-0");
        assert_eq!(
            items[0]["config"]["oauth2RedirectUrl"],
            "https://example.com/libraries/swagger-ui/dist/oauth2-redirect.html"
        );
        assert_eq!(items[1]["message"], "Could not create URL to file.");
    }

    #[test]
    fn test_root_override() {
        let (dir, config) = fixture("5.17.14");
        let config = config.to_str().unwrap();
        let other = dir.path().join("empty-root");
        fs::create_dir_all(&other).unwrap();
        let other = other.to_str().unwrap();

        // Resolved and cached under the configured root first.
        let (outcome, _) = run_args(&["swagger-ui-formatter", "-c", config, "directory"]);
        assert_eq!(outcome, Outcome::Success);
        // The file cache is shared, yet the empty root is validated afresh.
        let (outcome, out) = run_args(&["swagger-ui-formatter", "-c", config, "--root", other, "directory"]);
        assert_eq!(outcome, Outcome::Unavailable);
        assert!(out.is_empty());
        let (outcome, _) = run_args(&["swagger-ui-formatter", "-c", config, "--root", other, "status"]);
        assert_eq!(outcome, Outcome::Unavailable);
        // And back again.
        let (outcome, out) = run_args(&["swagger-ui-formatter", "-c", config, "directory"]);
        assert_eq!(outcome, Outcome::Success);
        assert_eq!(out, "libraries/swagger-ui\n");
    }

    #[test]
    fn test_discovery_config_change_invalidates_cache() {
        let (dir, config) = fixture("5.17.14");
        run_args(&["swagger-ui-formatter", "-c", config.to_str().unwrap(), "directory"]);

        // Same root and cache, but the library now lives elsewhere.
        let changed = dir.path().join("changed.json");
        let contents = serde_json::json!({
            "root": dir.path().join("root"),
            "discovery": {"library_directory": "libraries/missing"},
            "cache": {"backend": "file", "path": dir.path().join("cache/cache.json")},
        });
        fs::write(&changed, contents.to_string()).unwrap();
        let (outcome, _) = run_args(&["swagger-ui-formatter", "-c", changed.to_str().unwrap(), "directory"]);
        assert_eq!(outcome, Outcome::Unavailable);
    }

    #[test]
    fn test_summary() {
        let temp_dir = tempfile::tempdir().unwrap();
        let settings = temp_dir.path().join("settings.json");
        fs::write(&settings, r#"{"show_top_bar": true, "supported_submit_methods": ["get"]}"#).unwrap();
        let (outcome, out) = run_args(&["swagger-ui-formatter", "summary", "--settings", settings.to_str().unwrap()]);
        assert_eq!(outcome, Outcome::Success);
        assert_eq!(
            out,
            "Uses default validator, Doc Expansion of list, Shows top bar: Yes, Tags sorted by name: No, \
             Try it out support for HTTP Methods: GET.\n"
        );
    }
}
