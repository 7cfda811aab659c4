//! Rendered output.

use crate::error::{ErrorKind, Result};
use crate::settings::{DocExpansion, FormatterSettings, SubmitMethod, Validator};
use exn::ResultExt;
use serde::Serialize;
use std::collections::BTreeMap;
use swagger_ui_cache::CacheableMetadata;
use swagger_ui_discovery::LibraryLocation;

/// Browser-side configuration of one Swagger UI instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceConfig {
    pub oauth2_redirect_url: String,
    pub swagger_file: String,
    pub validator: Validator,
    pub validator_url: String,
    pub doc_expansion: DocExpansion,
    pub show_top_bar: bool,
    pub sort_tags_by_name: bool,
    pub supported_submit_methods: Vec<SubmitMethod>,
}
impl InstanceConfig {
    pub(crate) fn new(settings: &FormatterSettings, oauth2_redirect_url: &str, swagger_file: String) -> Self {
        Self {
            oauth2_redirect_url: oauth2_redirect_url.to_string(),
            swagger_file,
            validator: settings.validator,
            validator_url: settings.validator_url.clone(),
            doc_expansion: settings.doc_expansion,
            show_top_bar: settings.show_top_bar,
            sort_tags_by_name: settings.sort_tags_by_name,
            supported_submit_methods: settings.supported_submit_methods.iter().copied().collect(),
        }
    }
}

/// Library assets a page has to load, relative to the application root.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LibraryDefinition {
    pub version: String,
    pub css: Vec<String>,
    pub js: Vec<String>,
}
impl LibraryDefinition {
    pub fn new(directory: &LibraryLocation, version: String) -> Self {
        Self {
            version,
            css: vec![directory.join("dist/swagger-ui.css")],
            js: vec![directory.join("dist/swagger-ui-bundle.js"), directory.join("dist/swagger-ui-standalone-preset.js")],
        }
    }
}

/// One field item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Item {
    Instance { delta: usize, key: String, config: InstanceConfig },
    Error { delta: usize, message: String },
}
impl Item {
    pub(crate) fn error(delta: usize, kind: ErrorKind) -> Self {
        Self::Error { delta, message: kind.to_string() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Output {
    /// Discovery failed; nothing but the message is shown.
    Unavailable { message: String },
    Available { library: LibraryDefinition, items: Vec<Item> },
}

/// Output plus the cacheability a page cache has to honour for it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Rendered {
    pub output: Output,
    pub cacheability: CacheableMetadata,
}
impl Rendered {
    pub fn is_available(&self) -> bool {
        matches!(self.output, Output::Available { .. })
    }

    /// Instance configurations keyed `{field}-{delta}`, as the browser-side
    /// loader expects them.
    pub fn instance_settings(&self) -> BTreeMap<&str, &InstanceConfig> {
        let Output::Available { items, .. } = &self.output else {
            return BTreeMap::new();
        };
        items
            .iter()
            .filter_map(|item| match item {
                Item::Instance { key, config, .. } => Some((key.as_str(), config)),
                Item::Error { .. } => None,
            })
            .collect()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).or_raise(|| ErrorKind::Serialize)
    }
}
