//! Option block -> nested attribute map.
//!
//! One mapper per block. Only members present on the wire are emitted;
//! numeric defaults are rendered as decimal strings.

use std::collections::BTreeMap;

use fieldstat_core::{
    DateArrayOptions, DateOptions, DoubleArrayOptions, DoubleOptions, FlatValue, IndexField, IndexFieldType,
    IntArrayOptions, IntOptions, LatLonOptions, LiteralArrayOptions, LiteralOptions, TextArrayOptions, TextOptions,
};
use tracing::debug;

// ---------------- Nested attribute names (stable) ----------------
pub const ATTR_ANALYSIS_SCHEME: &str = "analysis_scheme";
pub const ATTR_DEFAULT_VALUE: &str = "default_value";
pub const ATTR_FACET: &str = "facet";
pub const ATTR_HIGHLIGHT: &str = "highlight";
pub const ATTR_RETURN: &str = "return";
pub const ATTR_SEARCH: &str = "search";
pub const ATTR_SORT: &str = "sort";
pub const ATTR_SOURCE_FIELD: &str = "source_field";
pub const ATTR_SOURCE_FIELDS: &str = "source_fields";

/// An option block that can be projected into nested attributes.
pub trait OptionBlock {
    fn attributes(&self) -> BTreeMap<String, FlatValue>;
}

#[derive(Default)]
struct Attrs(BTreeMap<String, FlatValue>);

impl Attrs {
    fn string(mut self, key: &str, v: &Option<String>) -> Self {
        if let Some(s) = v { self.0.insert(key.to_string(), FlatValue::String(s.clone())); }
        self
    }

    fn boolean(mut self, key: &str, v: Option<bool>) -> Self {
        if let Some(b) = v { self.0.insert(key.to_string(), FlatValue::Bool(b)); }
        self
    }

    fn number<T: ToString>(mut self, key: &str, v: Option<T>) -> Self {
        if let Some(n) = v { self.0.insert(key.to_string(), FlatValue::String(n.to_string())); }
        self
    }

    fn done(self) -> BTreeMap<String, FlatValue> { self.0 }
}

impl OptionBlock for IntOptions {
    fn attributes(&self) -> BTreeMap<String, FlatValue> {
        Attrs::default()
            .number(ATTR_DEFAULT_VALUE, self.default_value)
            .boolean(ATTR_FACET, self.facet_enabled)
            .boolean(ATTR_RETURN, self.return_enabled)
            .boolean(ATTR_SEARCH, self.search_enabled)
            .boolean(ATTR_SORT, self.sort_enabled)
            .string(ATTR_SOURCE_FIELD, &self.source_field)
            .done()
    }
}

impl OptionBlock for DoubleOptions {
    fn attributes(&self) -> BTreeMap<String, FlatValue> {
        Attrs::default()
            .number(ATTR_DEFAULT_VALUE, self.default_value)
            .boolean(ATTR_FACET, self.facet_enabled)
            .boolean(ATTR_RETURN, self.return_enabled)
            .boolean(ATTR_SEARCH, self.search_enabled)
            .boolean(ATTR_SORT, self.sort_enabled)
            .string(ATTR_SOURCE_FIELD, &self.source_field)
            .done()
    }
}

impl OptionBlock for LiteralOptions {
    fn attributes(&self) -> BTreeMap<String, FlatValue> {
        Attrs::default()
            .string(ATTR_DEFAULT_VALUE, &self.default_value)
            .boolean(ATTR_FACET, self.facet_enabled)
            .boolean(ATTR_RETURN, self.return_enabled)
            .boolean(ATTR_SEARCH, self.search_enabled)
            .boolean(ATTR_SORT, self.sort_enabled)
            .string(ATTR_SOURCE_FIELD, &self.source_field)
            .done()
    }
}

impl OptionBlock for TextOptions {
    fn attributes(&self) -> BTreeMap<String, FlatValue> {
        Attrs::default()
            .string(ATTR_ANALYSIS_SCHEME, &self.analysis_scheme)
            .string(ATTR_DEFAULT_VALUE, &self.default_value)
            .boolean(ATTR_HIGHLIGHT, self.highlight_enabled)
            .boolean(ATTR_RETURN, self.return_enabled)
            .boolean(ATTR_SORT, self.sort_enabled)
            .string(ATTR_SOURCE_FIELD, &self.source_field)
            .done()
    }
}

impl OptionBlock for DateOptions {
    fn attributes(&self) -> BTreeMap<String, FlatValue> {
        Attrs::default()
            .string(ATTR_DEFAULT_VALUE, &self.default_value)
            .boolean(ATTR_FACET, self.facet_enabled)
            .boolean(ATTR_RETURN, self.return_enabled)
            .boolean(ATTR_SEARCH, self.search_enabled)
            .boolean(ATTR_SORT, self.sort_enabled)
            .string(ATTR_SOURCE_FIELD, &self.source_field)
            .done()
    }
}

impl OptionBlock for LatLonOptions {
    fn attributes(&self) -> BTreeMap<String, FlatValue> {
        Attrs::default()
            .string(ATTR_DEFAULT_VALUE, &self.default_value)
            .boolean(ATTR_FACET, self.facet_enabled)
            .boolean(ATTR_RETURN, self.return_enabled)
            .boolean(ATTR_SEARCH, self.search_enabled)
            .boolean(ATTR_SORT, self.sort_enabled)
            .string(ATTR_SOURCE_FIELD, &self.source_field)
            .done()
    }
}

impl OptionBlock for IntArrayOptions {
    fn attributes(&self) -> BTreeMap<String, FlatValue> {
        Attrs::default()
            .number(ATTR_DEFAULT_VALUE, self.default_value)
            .boolean(ATTR_FACET, self.facet_enabled)
            .boolean(ATTR_RETURN, self.return_enabled)
            .boolean(ATTR_SEARCH, self.search_enabled)
            .string(ATTR_SOURCE_FIELDS, &self.source_fields)
            .done()
    }
}

impl OptionBlock for DoubleArrayOptions {
    fn attributes(&self) -> BTreeMap<String, FlatValue> {
        Attrs::default()
            .number(ATTR_DEFAULT_VALUE, self.default_value)
            .boolean(ATTR_FACET, self.facet_enabled)
            .boolean(ATTR_RETURN, self.return_enabled)
            .boolean(ATTR_SEARCH, self.search_enabled)
            .string(ATTR_SOURCE_FIELDS, &self.source_fields)
            .done()
    }
}

impl OptionBlock for LiteralArrayOptions {
    fn attributes(&self) -> BTreeMap<String, FlatValue> {
        Attrs::default()
            .string(ATTR_DEFAULT_VALUE, &self.default_value)
            .boolean(ATTR_FACET, self.facet_enabled)
            .boolean(ATTR_RETURN, self.return_enabled)
            .boolean(ATTR_SEARCH, self.search_enabled)
            .string(ATTR_SOURCE_FIELDS, &self.source_fields)
            .done()
    }
}

impl OptionBlock for TextArrayOptions {
    fn attributes(&self) -> BTreeMap<String, FlatValue> {
        Attrs::default()
            .string(ATTR_ANALYSIS_SCHEME, &self.analysis_scheme)
            .string(ATTR_DEFAULT_VALUE, &self.default_value)
            .boolean(ATTR_HIGHLIGHT, self.highlight_enabled)
            .boolean(ATTR_RETURN, self.return_enabled)
            .string(ATTR_SOURCE_FIELDS, &self.source_fields)
            .done()
    }
}

impl OptionBlock for DateArrayOptions {
    fn attributes(&self) -> BTreeMap<String, FlatValue> {
        Attrs::default()
            .string(ATTR_DEFAULT_VALUE, &self.default_value)
            .boolean(ATTR_FACET, self.facet_enabled)
            .boolean(ATTR_RETURN, self.return_enabled)
            .boolean(ATTR_SEARCH, self.search_enabled)
            .string(ATTR_SOURCE_FIELDS, &self.source_fields)
            .done()
    }
}

/// Nested attributes of the block stored under type tag `t`, if that block is set.
pub fn attributes_for(field: &IndexField, t: &IndexFieldType) -> Option<BTreeMap<String, FlatValue>> {
    match t {
        IndexFieldType::Int => field.int_options.as_ref().map(OptionBlock::attributes),
        IndexFieldType::Double => field.double_options.as_ref().map(OptionBlock::attributes),
        IndexFieldType::Literal => field.literal_options.as_ref().map(OptionBlock::attributes),
        IndexFieldType::Text => field.text_options.as_ref().map(OptionBlock::attributes),
        IndexFieldType::Date => field.date_options.as_ref().map(OptionBlock::attributes),
        IndexFieldType::Latlon => field.lat_lon_options.as_ref().map(OptionBlock::attributes),
        IndexFieldType::IntArray => field.int_array_options.as_ref().map(OptionBlock::attributes),
        IndexFieldType::DoubleArray => field.double_array_options.as_ref().map(OptionBlock::attributes),
        IndexFieldType::LiteralArray => field.literal_array_options.as_ref().map(OptionBlock::attributes),
        IndexFieldType::TextArray => field.text_array_options.as_ref().map(OptionBlock::attributes),
        IndexFieldType::DateArray => field.date_array_options.as_ref().map(OptionBlock::attributes),
        IndexFieldType::Other(_) => None,
    }
}

/// Pick the option block to flatten.
///
/// The block matching the field's own type tag wins. When it is not set the
/// first populated block in `IndexFieldType::KNOWN` order is used instead.
/// Returns the tag of the block actually used; its attributes are stored
/// under that tag so they read back as the same block.
pub fn select_block(field: &IndexField) -> Option<(IndexFieldType, BTreeMap<String, FlatValue>)> {
    let tag = &field.index_field_type;
    if let Some(attrs) = attributes_for(field, tag) {
        return Some((tag.clone(), attrs));
    }
    let fallback = field.populated_blocks().into_iter().next()?;
    debug!(field = ?field.index_field_name, tag = %tag, block = %fallback, "type tag block unset; using first populated block");
    let attrs = attributes_for(field, &fallback)?;
    Some((fallback, attrs))
}
