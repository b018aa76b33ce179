//! fieldstat flatten: project CloudSearch index field statuses into flat records.
//!
//! - `flatten_field_status` decides inclusion for one record and builds its attributes
//! - `flatten_field_statuses` applies it to a list, dropping omitted entries
//! - `expand_index_field` goes the other way, from a stored record to an `IndexField`

#![forbid(unsafe_code)]

use chrono::SecondsFormat;
use fieldstat_core::{FlatRecord, FlatValue, FlattenError, IndexField, IndexFieldStatus, IndexFieldType, OptionStatus};
use metrics::counter;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

pub mod expand;
pub mod options;

pub use expand::expand_index_field;

// ---------------- Top-level attribute names (stable) ----------------
pub const ATTR_NAME: &str = "name";
pub const ATTR_TYPE: &str = "type";
pub const ATTR_STATE: &str = "state";
pub const ATTR_CREATION_DATE: &str = "creation_date";
pub const ATTR_UPDATE_DATE: &str = "update_date";
pub const ATTR_UPDATE_VERSION: &str = "update_version";

/// Why a record was left out of the flattened set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    MissingOptions,
    MissingStatus,
    PendingDeletion,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingOptions => "missing_options",
            Self::MissingStatus => "missing_status",
            Self::PendingDeletion => "pending_deletion",
        }
    }
}

/// Classify a record. `None` means it is kept.
pub fn skip_reason(rec: &IndexFieldStatus) -> Option<SkipReason> {
    classify(rec).err()
}

/// Split a record into its parts, or say why it is left out.
fn classify(rec: &IndexFieldStatus) -> Result<(&IndexField, &OptionStatus), SkipReason> {
    match (&rec.options, &rec.status) {
        (None, _) => Err(SkipReason::MissingOptions),
        (_, None) => Err(SkipReason::MissingStatus),
        (_, Some(status)) if status.is_pending_deletion() => Err(SkipReason::PendingDeletion),
        (Some(field), Some(status)) => Ok((field, status)),
    }
}

fn note_skipped(rec: &IndexFieldStatus, reason: SkipReason) {
    let field = rec.options.as_ref().and_then(|f| f.index_field_name.as_deref());
    debug!(field = ?field, reason = reason.as_str(), "omitting index field");
    counter!("flatten_skipped_total", 1u64, "reason" => reason.as_str());
}

/// Flatten one index field status.
///
/// Returns `Ok(None)` for records without options or status and for fields
/// pending deletion. Every other record comes back as `Ok(Some(_))`.
pub fn flatten_field_status(rec: &IndexFieldStatus) -> Result<Option<FlatRecord>, FlattenError> {
    match classify(rec) {
        Ok((field, status)) => flatten_included(field, status).map(Some),
        Err(reason) => {
            note_skipped(rec, reason);
            Ok(None)
        }
    }
}

fn flatten_included(field: &IndexField, status: &OptionStatus) -> Result<FlatRecord, FlattenError> {
    let tag = &field.index_field_type;
    let mut out = FlatRecord::new();
    // Always present; the service requires a name so an empty one only shows up in hand-built input.
    out.insert(ATTR_NAME, field.index_field_name.clone().unwrap_or_default());
    out.insert(ATTR_TYPE, tag.as_str());
    out.insert(ATTR_STATE, status.state.as_str());
    out.insert(ATTR_CREATION_DATE, status.creation_date.to_rfc3339_opts(SecondsFormat::Secs, true));
    out.insert(ATTR_UPDATE_DATE, status.update_date.to_rfc3339_opts(SecondsFormat::Secs, true));
    out.insert(ATTR_UPDATE_VERSION, status.update_version.to_string());

    if let IndexFieldType::Other(t) = tag {
        warn!(field = ?field.index_field_name, tag = %t, "unknown index field type; options left out");
    } else if let Some((block, attrs)) = options::select_block(field) {
        out.insert(block.as_str(), FlatValue::Map(attrs));
    }

    counter!("flatten_records_total", 1u64);
    trace!(field = ?field.index_field_name, tag = %tag, attrs = out.len(), "flattened index field");
    Ok(out)
}

/// Flatten a list of index field statuses, keeping input order.
///
/// Omitted records leave no entry behind. The first error aborts the whole
/// call and is returned as is.
pub fn flatten_field_statuses(recs: &[IndexFieldStatus]) -> Result<Vec<FlatRecord>, FlattenError> {
    let mut out = Vec::with_capacity(recs.len());
    for rec in recs {
        if let Some(flat) = flatten_field_status(rec)? {
            out.push(flat);
        }
    }
    Ok(out)
}

/// Counters describing how a list was filtered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlattenDebugInfo {
    pub total: usize,
    pub missing_options: usize,
    pub missing_status: usize,
    pub pending_deletion: usize,
    pub kept: usize,
}

impl FlattenDebugInfo {
    fn record(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::MissingOptions => self.missing_options += 1,
            SkipReason::MissingStatus => self.missing_status += 1,
            SkipReason::PendingDeletion => self.pending_deletion += 1,
        }
    }

    pub fn skipped(&self) -> usize { self.missing_options + self.missing_status + self.pending_deletion }
}

/// Like `flatten_field_statuses`, also reporting per-reason counts.
pub fn flatten_field_statuses_with_debug(
    recs: &[IndexFieldStatus],
) -> Result<(Vec<FlatRecord>, FlattenDebugInfo), FlattenError> {
    let mut dbg = FlattenDebugInfo { total: recs.len(), ..Default::default() };
    let mut out = Vec::with_capacity(recs.len());
    for rec in recs {
        match classify(rec) {
            Ok((field, status)) => out.push(flatten_included(field, status)?),
            Err(reason) => {
                note_skipped(rec, reason);
                dbg.record(reason);
            }
        }
    }
    dbg.kept = out.len();
    debug!(total = dbg.total, kept = dbg.kept, skipped = dbg.skipped(), "flattened index field statuses");
    Ok((out, dbg))
}
