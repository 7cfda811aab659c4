//! Swagger UI instance configuration.
//!
//! Turns formatter settings and a list of OpenAPI document URLs into what a
//! page needs to show Swagger UI: the library assets and one configuration
//! object per document. When discovery fails, the output degrades to a single
//! message instead.

pub mod error;
mod instance;
mod settings;

use crate::error::ErrorKind;
pub use crate::instance::{InstanceConfig, Item, LibraryDefinition, Output, Rendered};
pub use crate::settings::{DocExpansion, FormatterSettings, SubmitMethod, Validator};
use swagger_ui_cache::{CacheableDependency, CacheableMetadata};
use swagger_ui_discovery::LibraryDiscovery;
use tracing::instrument;

/// Build the output for one field.
///
/// `urls` holds one entry per field item; `None` marks an item whose document
/// URL could not be produced. `base_url` is the scheme and host the library is
/// served from. Discovery cacheability is merged into the result whether or
/// not discovery succeeded.
#[instrument(skip(discovery, settings, urls), fields(items = urls.len()))]
pub fn build(
    discovery: &dyn LibraryDiscovery,
    settings: &FormatterSettings,
    field_name: &str,
    urls: &[Option<String>],
    base_url: &str,
) -> Rendered {
    let cacheability = CacheableMetadata::new().merge(&discovery.cacheability());
    let resolved = discovery
        .library_directory()
        .and_then(|directory| Ok((directory, discovery.library_version()?)));
    let (directory, version) = match resolved {
        Ok(resolved) => resolved,
        Err(err) => {
            tracing::warn!(code = err.code(), error = ?err, "Swagger UI library unavailable");
            let message = ErrorKind::LibraryUnavailable.to_string();
            return Rendered { output: Output::Unavailable { message }, cacheability };
        },
    };

    let oauth2_redirect_url = format!("{}/{}", base_url.trim_end_matches('/'), directory.join("dist/oauth2-redirect.html"));
    let items = urls
        .iter()
        .enumerate()
        .map(|(delta, url)| match url {
            Some(url) => Item::Instance {
                delta,
                key: format!("{field_name}-{delta}"),
                config: InstanceConfig::new(settings, &oauth2_redirect_url, url.clone()),
            },
            None => {
                tracing::debug!(field = field_name, delta, "No URL for field item");
                Item::error(delta, ErrorKind::FileUrl)
            },
        })
        .collect();
    let library = LibraryDefinition::new(&directory, version);
    Rendered { output: Output::Available { library, items }, cacheability }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use swagger_ui_cache::{MaxAge, MemoryCache};
    use swagger_ui_discovery::error::{ErrorKind as DiscoveryErrorKind, Result as DiscoveryResult};
    use swagger_ui_discovery::{Discovery, DownloadedArtifact, LibraryLocation, REQUIRED_FILES, ThemeChain};
    use swagger_ui_storage::backend::MockFilesystem;

    const LIBRARY: &str = "libraries/swagger-ui";

    fn discovery(version: &str) -> Discovery {
        let fs = MockFilesystem::default();
        for file in REQUIRED_FILES {
            fs.insert(format!("{LIBRARY}/{file}"), "/* asset */");
        }
        fs.insert(format!("{LIBRARY}/package.json"), format!(r#"{{"version": "{version}"}}"#));
        Discovery::new(
            DownloadedArtifact::new(LIBRARY, ThemeChain::default()),
            Arc::new(MemoryCache::new()),
            Arc::new(fs),
        )
    }

    /// Discovery double with a fixed directory, a short max age and an extra
    /// context, to check that cacheability is merged rather than replaced.
    struct FixedDiscovery;
    impl CacheableDependency for FixedDiscovery {
        fn cacheability(&self) -> CacheableMetadata {
            CacheableMetadata::new().with_tags(["fixed"]).with_contexts(["url.site"]).with_max_age(MaxAge::Seconds(60))
        }
    }
    impl LibraryDiscovery for FixedDiscovery {
        fn library_directory(&self) -> DiscoveryResult<LibraryLocation> {
            discovery("5.0.0").library_directory()
        }
        fn library_version(&self) -> DiscoveryResult<String> {
            Err(DiscoveryErrorKind::VersionFieldMissing("libraries/swagger-ui/package.json".into()).into())
        }
        fn reset(&self) -> DiscoveryResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_instances() {
        let discovery = discovery("5.17.14");
        let urls = [Some("https://example.com/sites/default/files/petstore.yaml".to_string()), None];
        let rendered = build(&discovery, &FormatterSettings::default(), "field_api_spec", &urls, "https://example.com/");
        assert!(rendered.is_available());

        let Output::Available { library, items } = &rendered.output else {
            panic!("library should be available");
        };
        assert_eq!(library.version, "5.17.14");
        assert_eq!(library.css, ["libraries/swagger-ui/dist/swagger-ui.css"]);
        assert_eq!(
            library.js,
            ["libraries/swagger-ui/dist/swagger-ui-bundle.js", "libraries/swagger-ui/dist/swagger-ui-standalone-preset.js"]
        );
        assert_eq!(items.len(), 2);
        assert_eq!(items[1], Item::Error { delta: 1, message: "Could not create URL to file.".to_string() });

        let settings = rendered.instance_settings();
        assert_eq!(settings.keys().copied().collect::<Vec<_>>(), ["field_api_spec-0"]);
        let json = serde_json::to_value(settings["field_api_spec-0"]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "oauth2RedirectUrl": "https://example.com/libraries/swagger-ui/dist/oauth2-redirect.html",
                "swaggerFile": "https://example.com/sites/default/files/petstore.yaml",
                "validator": "default",
                "validatorUrl": "",
                "docExpansion": "list",
                "showTopBar": false,
                "sortTagsByName": false,
                "supportedSubmitMethods": ["get", "put", "post", "delete", "options", "head", "patch"]
            })
        );
    }

    #[test]
    fn test_unavailable() {
        let discovery = discovery("3.9.9");
        let urls = [Some("https://example.com/petstore.json".to_string())];
        let rendered = build(&discovery, &FormatterSettings::default(), "field_api_spec", &urls, "https://example.com");
        assert!(!rendered.is_available());
        assert_eq!(
            rendered.output,
            Output::Unavailable {
                message: "The Swagger UI library is missing, incorrectly defined or not supported.".to_string()
            }
        );
        assert!(rendered.instance_settings().is_empty());
        // Cacheability is attached even when degraded, so a fixed install is
        // picked up once the tags are invalidated.
        assert_eq!(rendered.cacheability, discovery.cacheability());
    }

    #[test]
    fn test_cacheability_is_merged() {
        let rendered = build(&FixedDiscovery, &FormatterSettings::default(), "field", &[], "https://example.com");
        assert!(!rendered.is_available());
        assert!(rendered.cacheability.tags.contains("fixed"));
        assert!(rendered.cacheability.contexts.contains("url.site"));
        assert_eq!(rendered.cacheability.max_age, MaxAge::Seconds(60));
    }

    #[test]
    fn test_custom_settings() {
        let discovery = discovery("4.15.0");
        let settings = FormatterSettings {
            validator: Validator::Custom,
            validator_url: "https://validator.example.com".to_string(),
            doc_expansion: DocExpansion::Full,
            show_top_bar: true,
            sort_tags_by_name: true,
            supported_submit_methods: [SubmitMethod::Patch, SubmitMethod::Get].into_iter().collect(),
        };
        let urls = [None, Some("/files/a.json".to_string()), Some("/files/b.json".to_string())];
        let rendered = build(&discovery, &settings, "spec", &urls, "http://localhost:8080");
        let instances = rendered.instance_settings();
        assert_eq!(instances.keys().copied().collect::<Vec<_>>(), ["spec-1", "spec-2"]);
        let config = instances["spec-2"];
        assert_eq!(config.swagger_file, "/files/b.json");
        assert_eq!(config.oauth2_redirect_url, "http://localhost:8080/libraries/swagger-ui/dist/oauth2-redirect.html");
        assert_eq!(config.validator_url, "https://validator.example.com");
        assert_eq!(config.supported_submit_methods, [SubmitMethod::Get, SubmitMethod::Patch]);
    }

    #[test]
    fn test_to_json() {
        let discovery = discovery("3.0.0");
        let rendered = build(&discovery, &FormatterSettings::default(), "field", &[], "https://example.com");
        let json: serde_json::Value = serde_json::from_str(&rendered.to_json().unwrap()).unwrap();
        assert_eq!(json["output"]["status"], "unavailable");
        assert_eq!(json["cacheability"]["max_age"], -1);
    }
}
