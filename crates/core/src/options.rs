//! Type-specific option blocks of an index field.
//!
//! Exactly one block is expected to be set per field, the one matching the
//! field's type tag. Every member is optional on the wire.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct IntOptions {
    pub default_value: Option<i64>,
    pub facet_enabled: Option<bool>,
    pub return_enabled: Option<bool>,
    pub search_enabled: Option<bool>,
    pub sort_enabled: Option<bool>,
    pub source_field: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DoubleOptions {
    pub default_value: Option<f64>,
    pub facet_enabled: Option<bool>,
    pub return_enabled: Option<bool>,
    pub search_enabled: Option<bool>,
    pub sort_enabled: Option<bool>,
    pub source_field: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LiteralOptions {
    pub default_value: Option<String>,
    pub facet_enabled: Option<bool>,
    pub return_enabled: Option<bool>,
    pub search_enabled: Option<bool>,
    pub sort_enabled: Option<bool>,
    pub source_field: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TextOptions {
    pub analysis_scheme: Option<String>,
    pub default_value: Option<String>,
    pub highlight_enabled: Option<bool>,
    pub return_enabled: Option<bool>,
    pub sort_enabled: Option<bool>,
    pub source_field: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DateOptions {
    pub default_value: Option<String>,
    pub facet_enabled: Option<bool>,
    pub return_enabled: Option<bool>,
    pub search_enabled: Option<bool>,
    pub sort_enabled: Option<bool>,
    pub source_field: Option<String>,
}

/// Default value is a `"lat,lon"` pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LatLonOptions {
    pub default_value: Option<String>,
    pub facet_enabled: Option<bool>,
    pub return_enabled: Option<bool>,
    pub search_enabled: Option<bool>,
    pub sort_enabled: Option<bool>,
    pub source_field: Option<String>,
}

// Array types cannot be sorted and take a comma separated list of source fields.

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct IntArrayOptions {
    pub default_value: Option<i64>,
    pub facet_enabled: Option<bool>,
    pub return_enabled: Option<bool>,
    pub search_enabled: Option<bool>,
    pub source_fields: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DoubleArrayOptions {
    pub default_value: Option<f64>,
    pub facet_enabled: Option<bool>,
    pub return_enabled: Option<bool>,
    pub search_enabled: Option<bool>,
    pub source_fields: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LiteralArrayOptions {
    pub default_value: Option<String>,
    pub facet_enabled: Option<bool>,
    pub return_enabled: Option<bool>,
    pub search_enabled: Option<bool>,
    pub source_fields: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TextArrayOptions {
    pub analysis_scheme: Option<String>,
    pub default_value: Option<String>,
    pub highlight_enabled: Option<bool>,
    pub return_enabled: Option<bool>,
    pub source_fields: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DateArrayOptions {
    pub default_value: Option<String>,
    pub facet_enabled: Option<bool>,
    pub return_enabled: Option<bool>,
    pub search_enabled: Option<bool>,
    pub source_fields: Option<String>,
}
