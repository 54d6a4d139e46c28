use serde::Serialize;
use std::path::PathBuf;

/// A plain value rebuilt from source code: the JSON data model, with object
/// keys kept in the order they were written.
pub type ConfigValue = serde_json::Value;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    pub route: String,
    pub file_path: PathBuf,
    pub has_primary_export: bool,
    pub has_fallback_export: bool,
    /// True when `config` was synthesized from the fallback export
    pub uses_fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<ConfigValue>,
    pub warnings: Vec<String>,
}

impl PageRecord {
    pub fn new(route: impl Into<String>, file_path: impl Into<PathBuf>) -> Self {
        Self {
            route: route.into(),
            file_path: file_path.into(),
            has_primary_export: false,
            has_fallback_export: false,
            uses_fallback: false,
            config: None,
            warnings: Vec::new(),
        }
    }

    /// String field of `config`, if present.
    pub fn config_str(&self, key: &str) -> Option<&str> {
        self.config.as_ref()?.get(key)?.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkEntry {
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub title: String,
    pub items: Vec<LinkEntry>,
}

/// Site-wide index assembled from every page that has a configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteConfig {
    pub title: String,
    pub description: String,
    pub sections: Vec<Section>,
}

/// Routes under `prefix` are grouped into a section named `title`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRule {
    pub title: String,
    pub prefix: String,
}
