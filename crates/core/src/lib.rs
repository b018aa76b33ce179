//! fieldstat core types: CloudSearch index-field wire model, flat records and errors.

#![forbid(unsafe_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod flat;
pub mod options;

pub use flat::{FlatRecord, FlatValue};
pub use options::*;

pub mod prelude {
    pub use super::{
        DescribeIndexFieldsOutput, FlatRecord, FlatValue, FlattenError, IndexField, IndexFieldStatus, IndexFieldType,
        OptionState, OptionStatus,
    };
}

/// Errors raised while mapping between wire records and flat records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlattenError {
    #[error("unsupported index field type: {0}")]
    UnsupportedFieldType(String),

    #[error("missing attribute `{0}`")]
    MissingAttribute(&'static str),

    #[error("invalid attribute `{attr}`: {reason}")]
    InvalidAttribute { attr: String, reason: String },
}

/// Type tag of an index field. Selects which option block is meaningful.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IndexFieldType {
    Int,
    Double,
    Literal,
    Text,
    Date,
    Latlon,
    IntArray,
    DoubleArray,
    LiteralArray,
    TextArray,
    DateArray,
    /// Tag reported by the service that this crate does not know about.
    Other(String),
}

impl IndexFieldType {
    /// Known tags in fixed precedence order.
    pub const KNOWN: [IndexFieldType; 11] = [
        Self::Int,
        Self::Double,
        Self::Literal,
        Self::Text,
        Self::Date,
        Self::Latlon,
        Self::IntArray,
        Self::DoubleArray,
        Self::LiteralArray,
        Self::TextArray,
        Self::DateArray,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Int => "int",
            Self::Double => "double",
            Self::Literal => "literal",
            Self::Text => "text",
            Self::Date => "date",
            Self::Latlon => "latlon",
            Self::IntArray => "int-array",
            Self::DoubleArray => "double-array",
            Self::LiteralArray => "literal-array",
            Self::TextArray => "text-array",
            Self::DateArray => "date-array",
            Self::Other(s) => s.as_str(),
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(
            self,
            Self::IntArray | Self::DoubleArray | Self::LiteralArray | Self::TextArray | Self::DateArray
        )
    }
}

impl From<&str> for IndexFieldType {
    fn from(s: &str) -> Self {
        match s {
            "int" => Self::Int,
            "double" => Self::Double,
            "literal" => Self::Literal,
            "text" => Self::Text,
            "date" => Self::Date,
            "latlon" => Self::Latlon,
            "int-array" => Self::IntArray,
            "double-array" => Self::DoubleArray,
            "literal-array" => Self::LiteralArray,
            "text-array" => Self::TextArray,
            "date-array" => Self::DateArray,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for IndexFieldType {
    fn from(s: String) -> Self {
        match Self::from(s.as_str()) {
            Self::Other(_) => Self::Other(s),
            known => known,
        }
    }
}

impl From<IndexFieldType> for String {
    fn from(t: IndexFieldType) -> Self {
        match t {
            IndexFieldType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for IndexFieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration of one index field as returned by `DescribeIndexFields`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IndexField {
    pub index_field_name: Option<String>,
    pub index_field_type: IndexFieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub int_options: Option<IntOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub double_options: Option<DoubleOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literal_options: Option<LiteralOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_options: Option<TextOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_options: Option<DateOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat_lon_options: Option<LatLonOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub int_array_options: Option<IntArrayOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub double_array_options: Option<DoubleArrayOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literal_array_options: Option<LiteralArrayOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_array_options: Option<TextArrayOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_array_options: Option<DateArrayOptions>,
}

impl IndexField {
    /// A field with the given name and type tag and no option block set.
    pub fn new(name: impl Into<String>, field_type: IndexFieldType) -> Self {
        Self {
            index_field_name: Some(name.into()),
            index_field_type: field_type,
            int_options: None,
            double_options: None,
            literal_options: None,
            text_options: None,
            date_options: None,
            lat_lon_options: None,
            int_array_options: None,
            double_array_options: None,
            literal_array_options: None,
            text_array_options: None,
            date_array_options: None,
        }
    }

    /// Type tags whose option block is populated, in `IndexFieldType::KNOWN` order.
    pub fn populated_blocks(&self) -> Vec<IndexFieldType> {
        IndexFieldType::KNOWN
            .iter()
            .filter(|t| self.has_block(t))
            .cloned()
            .collect()
    }

    pub fn has_block(&self, t: &IndexFieldType) -> bool {
        match t {
            IndexFieldType::Int => self.int_options.is_some(),
            IndexFieldType::Double => self.double_options.is_some(),
            IndexFieldType::Literal => self.literal_options.is_some(),
            IndexFieldType::Text => self.text_options.is_some(),
            IndexFieldType::Date => self.date_options.is_some(),
            IndexFieldType::Latlon => self.lat_lon_options.is_some(),
            IndexFieldType::IntArray => self.int_array_options.is_some(),
            IndexFieldType::DoubleArray => self.double_array_options.is_some(),
            IndexFieldType::LiteralArray => self.literal_array_options.is_some(),
            IndexFieldType::TextArray => self.text_array_options.is_some(),
            IndexFieldType::DateArray => self.date_array_options.is_some(),
            IndexFieldType::Other(_) => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionState {
    RequiresIndexDocuments,
    Processing,
    Active,
    FailedToValidate,
    #[serde(other)]
    Unknown,
}

impl OptionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RequiresIndexDocuments => "RequiresIndexDocuments",
            Self::Processing => "Processing",
            Self::Active => "Active",
            Self::FailedToValidate => "FailedToValidate",
            Self::Unknown => "Unknown",
        }
    }
}

/// Lifecycle status of a configured option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OptionStatus {
    pub creation_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
    #[serde(default)]
    pub update_version: i32,
    pub state: OptionState,
    /// Absent is treated the same as `false`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_deletion: Option<bool>,
}

impl OptionStatus {
    pub fn is_pending_deletion(&self) -> bool {
        self.pending_deletion.unwrap_or(false)
    }
}

/// One entry of a `DescribeIndexFields` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IndexFieldStatus {
    #[serde(default)]
    pub options: Option<IndexField>,
    #[serde(default)]
    pub status: Option<OptionStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeIndexFieldsOutput {
    #[serde(default)]
    pub index_fields: Vec<IndexFieldStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_tags_round_trip_through_strings() {
        for t in IndexFieldType::KNOWN.iter() {
            assert_eq!(&IndexFieldType::from(t.as_str()), t);
        }
        assert_eq!(IndexFieldType::from("geo"), IndexFieldType::Other("geo".to_string()));
        assert!(IndexFieldType::TextArray.is_array());
        assert!(!IndexFieldType::Latlon.is_array());
    }

    #[test]
    fn deserializes_describe_index_fields_document() {
        let doc = serde_json::json!({
            "IndexFields": [
                {
                    "Options": {
                        "IndexFieldName": "title",
                        "IndexFieldType": "text",
                        "TextOptions": { "AnalysisScheme": "_en_default_", "ReturnEnabled": true }
                    },
                    "Status": {
                        "CreationDate": "2025-01-01T00:00:00Z",
                        "UpdateDate": "2025-01-02T00:00:00Z",
                        "UpdateVersion": 3,
                        "State": "Processing",
                        "PendingDeletion": true
                    }
                },
                {
                    "Options": {
                        "IndexFieldName": "loc",
                        "IndexFieldType": "latlon",
                        "LatLonOptions": { "DefaultValue": "0,0", "SearchEnabled": true }
                    }
                }
            ]
        });
        let out: DescribeIndexFieldsOutput = serde_json::from_value(doc).unwrap();
        assert_eq!(out.index_fields.len(), 2);

        let first = &out.index_fields[0];
        let field = first.options.as_ref().unwrap();
        assert_eq!(field.index_field_type, IndexFieldType::Text);
        assert_eq!(field.text_options.as_ref().unwrap().analysis_scheme.as_deref(), Some("_en_default_"));
        let status = first.status.as_ref().unwrap();
        assert_eq!(status.state, OptionState::Processing);
        assert_eq!(status.update_version, 3);
        assert!(status.is_pending_deletion());

        let loc = out.index_fields[1].options.as_ref().unwrap();
        assert_eq!(loc.lat_lon_options.as_ref().unwrap().default_value.as_deref(), Some("0,0"));
        let back = serde_json::to_value(loc).unwrap();
        assert_eq!(back["LatLonOptions"]["SearchEnabled"], serde_json::json!(true));
        assert!(out.index_fields[1].status.is_none());
    }

    #[test]
    fn unknown_state_and_type_do_not_fail_decoding() {
        let v = serde_json::json!({
            "Options": { "IndexFieldName": "x", "IndexFieldType": "vector" },
            "Status": {
                "CreationDate": "2025-01-01T00:00:00Z",
                "UpdateDate": "2025-01-01T00:00:00Z",
                "State": "Reindexing"
            }
        });
        let rec: IndexFieldStatus = serde_json::from_value(v).unwrap();
        assert_eq!(rec.options.unwrap().index_field_type, IndexFieldType::Other("vector".into()));
        let status = rec.status.unwrap();
        assert_eq!(status.state, OptionState::Unknown);
        assert!(!status.is_pending_deletion());
    }

    #[test]
    fn populated_blocks_follow_precedence_order() {
        let mut f = IndexField::new("f", IndexFieldType::Literal);
        f.literal_options = Some(LiteralOptions::default());
        f.int_options = Some(IntOptions::default());
        assert_eq!(f.populated_blocks(), vec![IndexFieldType::Int, IndexFieldType::Literal]);
    }
}
