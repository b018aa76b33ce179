#![forbid(unsafe_code)]

use fieldstat_core::{FlatValue, IndexFieldStatus};
use fieldstat_flatten::{flatten_field_status, flatten_field_statuses, flatten_field_statuses_with_debug};

const TS: &str = "2025-01-01T00:00:00Z";

fn status(state: &str, pending: Option<bool>) -> serde_json::Value {
    let mut s = serde_json::json!({ "CreationDate": TS, "UpdateDate": TS, "State": state });
    if let Some(p) = pending { s["PendingDeletion"] = serde_json::Value::Bool(p); }
    s
}

fn literal(name: &str) -> serde_json::Value {
    serde_json::json!({
        "IndexFieldName": name,
        "IndexFieldType": "literal",
        "LiteralOptions": { "ReturnEnabled": true }
    })
}

fn int(name: &str) -> serde_json::Value {
    serde_json::json!({
        "IndexFieldName": name,
        "IndexFieldType": "int",
        "IntOptions": { "ReturnEnabled": true }
    })
}

fn rec(options: Option<serde_json::Value>, status: Option<serde_json::Value>) -> IndexFieldStatus {
    let mut v = serde_json::json!({});
    if let Some(o) = options { v["Options"] = o; }
    if let Some(s) = status { v["Status"] = s; }
    serde_json::from_value(v).unwrap()
}

fn names(out: &[fieldstat_core::FlatRecord]) -> Vec<&str> {
    out.iter().map(|r| r.name().unwrap()).collect()
}

#[test]
fn skips_field_pending_deletion() {
    let input = vec![
        rec(Some(literal("field1")), Some(status("RequiresIndexDocuments", Some(true)))),
        rec(Some(literal("field2")), Some(status("Active", Some(false)))),
    ];
    let out = flatten_field_statuses(&input).unwrap();
    assert_eq!(names(&out), vec!["field2"]);
}

#[test]
fn skips_field_without_options() {
    let input = vec![
        rec(None, Some(status("Active", None))),
        rec(Some(literal("field2")), Some(status("Active", None))),
    ];
    let out = flatten_field_statuses(&input).unwrap();
    assert_eq!(names(&out), vec!["field2"]);
}

#[test]
fn skips_field_without_status() {
    let alone = vec![rec(Some(literal("field1")), None)];
    assert!(flatten_field_statuses(&alone).unwrap().is_empty());

    let input = vec![
        rec(Some(literal("field1")), None),
        rec(Some(literal("field2")), Some(status("Active", None))),
    ];
    let out = flatten_field_statuses(&input).unwrap();
    assert_eq!(names(&out), vec!["field2"]);
}

#[test]
fn all_pending_deletion_returns_empty() {
    let input = vec![rec(Some(literal("field1")), Some(status("RequiresIndexDocuments", Some(true))))];
    assert!(flatten_field_statuses(&input).unwrap().is_empty());
}

#[test]
fn no_pending_deletions_returns_all_fields() {
    let input = vec![
        rec(Some(literal("field1")), Some(status("Active", None))),
        rec(Some(int("field2")), Some(status("Active", None))),
    ];
    let out = flatten_field_statuses(&input).unwrap();
    assert_eq!(names(&out), vec!["field1", "field2"]);
    assert!(out[0].get("literal").and_then(FlatValue::as_map).is_some());
    assert!(out[1].get("int").and_then(FlatValue::as_map).is_some());
}

#[test]
fn empty_input_returns_empty() {
    assert!(flatten_field_statuses(&[]).unwrap().is_empty());
    let (out, dbg) = flatten_field_statuses_with_debug(&[]).unwrap();
    assert!(out.is_empty());
    assert_eq!(dbg.total, 0);
}

#[test]
fn length_matches_single_record_results_and_keeps_order() {
    let input = vec![
        rec(Some(literal("a")), Some(status("Active", None))),
        rec(None, None),
        rec(Some(int("b")), Some(status("Processing", Some(false)))),
        rec(Some(literal("c")), Some(status("Active", Some(true)))),
        rec(Some(literal("d")), None),
        rec(Some(int("e")), Some(status("FailedToValidate", None))),
    ];
    let singles: Vec<_> = input.iter().filter_map(|r| flatten_field_status(r).unwrap()).collect();
    let out = flatten_field_statuses(&input).unwrap();
    assert_eq!(out.len(), singles.len());
    assert_eq!(out, singles);
    assert_eq!(names(&out), vec!["a", "b", "e"]);
}

#[test]
fn debug_counters_partition_input() {
    let input = vec![
        rec(None, Some(status("Active", None))),
        rec(Some(literal("x")), None),
        rec(Some(literal("y")), Some(status("Active", Some(true)))),
        rec(Some(literal("z")), Some(status("Active", Some(true)))),
        rec(Some(int("w")), Some(status("Active", None))),
    ];
    let (out, dbg) = flatten_field_statuses_with_debug(&input).unwrap();
    assert_eq!(dbg.total, 5);
    assert_eq!(dbg.missing_options, 1);
    assert_eq!(dbg.missing_status, 1);
    assert_eq!(dbg.pending_deletion, 2);
    assert_eq!(dbg.kept, out.len());
    assert_eq!(dbg.skipped() + dbg.kept, dbg.total);
}

#[test]
fn unknown_type_tag_keeps_the_list() {
    let odd = serde_json::json!({ "IndexFieldName": "v", "IndexFieldType": "vector" });
    let input = vec![
        rec(Some(literal("a")), Some(status("Active", None))),
        rec(Some(odd), Some(status("Active", None))),
        rec(Some(literal("c")), Some(status("Active", None))),
    ];
    let out = flatten_field_statuses(&input).unwrap();
    assert_eq!(names(&out), vec!["a", "v", "c"]);
    assert_eq!(out[1].get("type").and_then(FlatValue::as_str), Some("vector"));
    assert!(!out[1].contains_key("vector"));

    let (out, dbg) = flatten_field_statuses_with_debug(&input).unwrap();
    assert_eq!(out.len(), 3);
    assert_eq!(dbg.kept, 3);
    assert_eq!(dbg.skipped(), 0);
}
