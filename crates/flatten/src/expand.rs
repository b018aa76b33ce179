//! Flat record -> `IndexField`, for building `DefineIndexField` requests from stored state.

use std::collections::BTreeMap;
use std::str::FromStr;

use fieldstat_core::{
    DateArrayOptions, DateOptions, DoubleArrayOptions, DoubleOptions, FlatRecord, FlatValue, FlattenError, IndexField,
    IndexFieldType, IntArrayOptions, IntOptions, LatLonOptions, LiteralArrayOptions, LiteralOptions, TextArrayOptions,
    TextOptions,
};

use crate::options::*;
use crate::{ATTR_NAME, ATTR_TYPE};

fn invalid(attr: impl Into<String>, reason: impl Into<String>) -> FlattenError {
    FlattenError::InvalidAttribute { attr: attr.into(), reason: reason.into() }
}

fn required_str<'a>(rec: &'a FlatRecord, key: &'static str) -> Result<&'a str, FlattenError> {
    let v = rec.get(key).ok_or(FlattenError::MissingAttribute(key))?;
    v.as_str().ok_or_else(|| invalid(key, format!("expected string, got {}", v.kind())))
}

/// Typed reads from the nested map stored under a type tag.
struct Nested<'a> {
    tag: &'a str,
    map: &'a BTreeMap<String, FlatValue>,
}

impl<'a> Nested<'a> {
    fn string(&self, key: &str) -> Result<Option<String>, FlattenError> {
        match self.map.get(key) {
            None => Ok(None),
            Some(FlatValue::String(s)) => Ok(Some(s.clone())),
            Some(v) => Err(invalid(format!("{}.{}", self.tag, key), format!("expected string, got {}", v.kind()))),
        }
    }

    fn boolean(&self, key: &str) -> Result<Option<bool>, FlattenError> {
        match self.map.get(key) {
            None => Ok(None),
            Some(FlatValue::Bool(b)) => Ok(Some(*b)),
            Some(v) => Err(invalid(format!("{}.{}", self.tag, key), format!("expected bool, got {}", v.kind()))),
        }
    }

    fn number<T: FromStr>(&self, key: &str) -> Result<Option<T>, FlattenError>
    where
        T::Err: std::fmt::Display,
    {
        match self.string(key)? {
            None => Ok(None),
            Some(s) => s
                .parse::<T>()
                .map(Some)
                .map_err(|e| invalid(format!("{}.{}", self.tag, key), format!("{:?}: {}", s, e))),
        }
    }
}

/// Rebuild an `IndexField` from a flat record.
///
/// `name` and `type` are required. The option block is read from the nested
/// map stored under the type tag; when there is none, from the first other
/// known tag that has one. Lifecycle attributes are ignored.
pub fn expand_index_field(rec: &FlatRecord) -> Result<IndexField, FlattenError> {
    let name = required_str(rec, ATTR_NAME)?;
    let tag = required_str(rec, ATTR_TYPE)?;
    let field_type = IndexFieldType::from(tag);
    if let IndexFieldType::Other(t) = &field_type {
        return Err(FlattenError::UnsupportedFieldType(t.clone()));
    }

    let mut field = IndexField::new(name, field_type.clone());
    let found = match rec.get(tag) {
        Some(v) => Some((field_type, v)),
        None => IndexFieldType::KNOWN.into_iter().find_map(|t| rec.get(t.as_str()).map(|v| (t, v))),
    };
    let Some((block, v)) = found else {
        return Ok(field);
    };
    let key = block.as_str();
    let map = v.as_map().ok_or_else(|| invalid(key, format!("expected map, got {}", v.kind())))?;
    let r = Nested { tag: key, map };
    expand_block(&mut field, &block, &r)?;
    Ok(field)
}

fn expand_block(field: &mut IndexField, block: &IndexFieldType, r: &Nested<'_>) -> Result<(), FlattenError> {
    match block {
        IndexFieldType::Int => {
            field.int_options = Some(IntOptions {
                default_value: r.number(ATTR_DEFAULT_VALUE)?,
                facet_enabled: r.boolean(ATTR_FACET)?,
                return_enabled: r.boolean(ATTR_RETURN)?,
                search_enabled: r.boolean(ATTR_SEARCH)?,
                sort_enabled: r.boolean(ATTR_SORT)?,
                source_field: r.string(ATTR_SOURCE_FIELD)?,
            });
        }
        IndexFieldType::Double => {
            field.double_options = Some(DoubleOptions {
                default_value: r.number(ATTR_DEFAULT_VALUE)?,
                facet_enabled: r.boolean(ATTR_FACET)?,
                return_enabled: r.boolean(ATTR_RETURN)?,
                search_enabled: r.boolean(ATTR_SEARCH)?,
                sort_enabled: r.boolean(ATTR_SORT)?,
                source_field: r.string(ATTR_SOURCE_FIELD)?,
            });
        }
        IndexFieldType::Literal => {
            field.literal_options = Some(LiteralOptions {
                default_value: r.string(ATTR_DEFAULT_VALUE)?,
                facet_enabled: r.boolean(ATTR_FACET)?,
                return_enabled: r.boolean(ATTR_RETURN)?,
                search_enabled: r.boolean(ATTR_SEARCH)?,
                sort_enabled: r.boolean(ATTR_SORT)?,
                source_field: r.string(ATTR_SOURCE_FIELD)?,
            });
        }
        IndexFieldType::Text => {
            field.text_options = Some(TextOptions {
                analysis_scheme: r.string(ATTR_ANALYSIS_SCHEME)?,
                default_value: r.string(ATTR_DEFAULT_VALUE)?,
                highlight_enabled: r.boolean(ATTR_HIGHLIGHT)?,
                return_enabled: r.boolean(ATTR_RETURN)?,
                sort_enabled: r.boolean(ATTR_SORT)?,
                source_field: r.string(ATTR_SOURCE_FIELD)?,
            });
        }
        IndexFieldType::Date => {
            field.date_options = Some(DateOptions {
                default_value: r.string(ATTR_DEFAULT_VALUE)?,
                facet_enabled: r.boolean(ATTR_FACET)?,
                return_enabled: r.boolean(ATTR_RETURN)?,
                search_enabled: r.boolean(ATTR_SEARCH)?,
                sort_enabled: r.boolean(ATTR_SORT)?,
                source_field: r.string(ATTR_SOURCE_FIELD)?,
            });
        }
        IndexFieldType::Latlon => {
            field.lat_lon_options = Some(LatLonOptions {
                default_value: r.string(ATTR_DEFAULT_VALUE)?,
                facet_enabled: r.boolean(ATTR_FACET)?,
                return_enabled: r.boolean(ATTR_RETURN)?,
                search_enabled: r.boolean(ATTR_SEARCH)?,
                sort_enabled: r.boolean(ATTR_SORT)?,
                source_field: r.string(ATTR_SOURCE_FIELD)?,
            });
        }
        IndexFieldType::IntArray => {
            field.int_array_options = Some(IntArrayOptions {
                default_value: r.number(ATTR_DEFAULT_VALUE)?,
                facet_enabled: r.boolean(ATTR_FACET)?,
                return_enabled: r.boolean(ATTR_RETURN)?,
                search_enabled: r.boolean(ATTR_SEARCH)?,
                source_fields: r.string(ATTR_SOURCE_FIELDS)?,
            });
        }
        IndexFieldType::DoubleArray => {
            field.double_array_options = Some(DoubleArrayOptions {
                default_value: r.number(ATTR_DEFAULT_VALUE)?,
                facet_enabled: r.boolean(ATTR_FACET)?,
                return_enabled: r.boolean(ATTR_RETURN)?,
                search_enabled: r.boolean(ATTR_SEARCH)?,
                source_fields: r.string(ATTR_SOURCE_FIELDS)?,
            });
        }
        IndexFieldType::LiteralArray => {
            field.literal_array_options = Some(LiteralArrayOptions {
                default_value: r.string(ATTR_DEFAULT_VALUE)?,
                facet_enabled: r.boolean(ATTR_FACET)?,
                return_enabled: r.boolean(ATTR_RETURN)?,
                search_enabled: r.boolean(ATTR_SEARCH)?,
                source_fields: r.string(ATTR_SOURCE_FIELDS)?,
            });
        }
        IndexFieldType::TextArray => {
            field.text_array_options = Some(TextArrayOptions {
                analysis_scheme: r.string(ATTR_ANALYSIS_SCHEME)?,
                default_value: r.string(ATTR_DEFAULT_VALUE)?,
                highlight_enabled: r.boolean(ATTR_HIGHLIGHT)?,
                return_enabled: r.boolean(ATTR_RETURN)?,
                source_fields: r.string(ATTR_SOURCE_FIELDS)?,
            });
        }
        IndexFieldType::DateArray => {
            field.date_array_options = Some(DateArrayOptions {
                default_value: r.string(ATTR_DEFAULT_VALUE)?,
                facet_enabled: r.boolean(ATTR_FACET)?,
                return_enabled: r.boolean(ATTR_RETURN)?,
                search_enabled: r.boolean(ATTR_SEARCH)?,
                source_fields: r.string(ATTR_SOURCE_FIELDS)?,
            });
        }
        IndexFieldType::Other(_) => {}
    }
    Ok(())
}
