//! Formatter settings.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Clone, Copy, Debug, Default, Display, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Validator {
    /// Swagger.io's online validator.
    #[default]
    #[display("default")]
    Default,
    #[display("none")]
    None,
    /// The URL in [`FormatterSettings::validator_url`].
    #[display("custom")]
    Custom,
}

/// How much of the API listing is expanded initially.
#[derive(Clone, Copy, Debug, Default, Display, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocExpansion {
    #[display("none")]
    None,
    /// Tags only.
    #[default]
    #[display("list")]
    List,
    /// Tags and operations.
    #[display("full")]
    Full,
}

/// HTTP methods that can have "Try it out" enabled. Ordered the way they are
/// presented.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitMethod {
    #[display("get")]
    Get,
    #[display("put")]
    Put,
    #[display("post")]
    Post,
    #[display("delete")]
    Delete,
    #[display("options")]
    Options,
    #[display("head")]
    Head,
    #[display("patch")]
    Patch,
}
impl SubmitMethod {
    pub const ALL: [SubmitMethod; 7] = [
        Self::Get,
        Self::Put,
        Self::Post,
        Self::Delete,
        Self::Options,
        Self::Head,
        Self::Patch,
    ];
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterSettings {
    pub validator: Validator,
    pub validator_url: String,
    pub doc_expansion: DocExpansion,
    pub show_top_bar: bool,
    pub sort_tags_by_name: bool,
    pub supported_submit_methods: BTreeSet<SubmitMethod>,
}
impl Default for FormatterSettings {
    fn default() -> Self {
        Self {
            validator: Validator::default(),
            validator_url: String::new(),
            doc_expansion: DocExpansion::default(),
            show_top_bar: false,
            sort_tags_by_name: false,
            supported_submit_methods: SubmitMethod::ALL.into_iter().collect(),
        }
    }
}
impl FormatterSettings {
    /// One-line description of the settings for administrators.
    pub fn summary(&self) -> String {
        let yes_no = |value: bool| if value { "Yes" } else { "No" };
        let methods = if self.supported_submit_methods.is_empty() {
            "None".to_string()
        } else {
            self.supported_submit_methods
                .iter()
                .map(|method| method.to_string().to_uppercase())
                .collect::<Vec<_>>()
                .join(", ")
        };
        format!(
            "Uses {} validator, Doc Expansion of {}, Shows top bar: {}, Tags sorted by name: {}, Try it out support for HTTP Methods: {}.",
            self.validator,
            self.doc_expansion,
            yes_no(self.show_top_bar),
            yes_no(self.sort_tags_by_name),
            methods,
        )
    }
}
