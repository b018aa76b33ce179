//! Flat attribute records stored in the resource model's set-typed attribute.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Attribute value: a scalar string, a boolean, or a nested attribute map.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlatValue {
    Bool(bool),
    String(String),
    Map(BTreeMap<String, FlatValue>),
}

impl FlatValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, FlatValue>> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::String(_) => "string",
            Self::Map(_) => "map",
        }
    }
}

impl From<bool> for FlatValue {
    fn from(b: bool) -> Self { Self::Bool(b) }
}

impl From<String> for FlatValue {
    fn from(s: String) -> Self { Self::String(s) }
}

impl From<&str> for FlatValue {
    fn from(s: &str) -> Self { Self::String(s.to_string()) }
}

impl From<BTreeMap<String, FlatValue>> for FlatValue {
    fn from(m: BTreeMap<String, FlatValue>) -> Self { Self::Map(m) }
}

/// One index field in normalized form. Keys are kept sorted so two records
/// with equal attributes compare and hash equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlatRecord {
    attrs: BTreeMap<String, FlatValue>,
}

impl FlatRecord {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FlatValue>) -> Option<FlatValue> {
        self.attrs.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&FlatValue> { self.attrs.get(key) }

    pub fn contains_key(&self, key: &str) -> bool { self.attrs.contains_key(key) }

    /// The `name` attribute, present on every record produced by flattening.
    pub fn name(&self) -> Option<&str> { self.get("name").and_then(FlatValue::as_str) }

    pub fn len(&self) -> usize { self.attrs.len() }

    pub fn is_empty(&self) -> bool { self.attrs.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FlatValue)> { self.attrs.iter() }

    pub fn into_inner(self) -> BTreeMap<String, FlatValue> { self.attrs }
}

impl From<BTreeMap<String, FlatValue>> for FlatRecord {
    fn from(attrs: BTreeMap<String, FlatValue>) -> Self { Self { attrs } }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_plain_json_object() {
        let mut nested = BTreeMap::new();
        nested.insert("return".to_string(), FlatValue::from(true));
        let mut rec = FlatRecord::new();
        rec.insert("name", "title");
        rec.insert("text", nested);

        let v = serde_json::to_value(&rec).unwrap();
        assert_eq!(v, serde_json::json!({ "name": "title", "text": { "return": true } }));

        let back: FlatRecord = serde_json::from_value(v).unwrap();
        assert_eq!(back, rec);
        assert_eq!(back.name(), Some("title"));
    }
}
