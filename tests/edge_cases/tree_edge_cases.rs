//! Edge case tests for unusual tree shapes

use propdiff::{ConfigTree, DiffEngine, VersionLabel, VersionView};
use serde_json::{json, Value};

fn diff_json(from: Value, to: Value) -> Option<Value> {
    let engine = DiffEngine::new(VersionLabel::from("A"), VersionLabel::from("B")).unwrap();
    engine
        .compare(&ConfigTree::from(from), &ConfigTree::from(to))
        .map(|node| node.to_json(engine.from_label(), engine.to_label()))
}

#[test]
fn test_mapping_against_scalar() {
    assert_eq!(
        diff_json(json!({"a": 1}), json!("a")),
        Some(json!({"A": {"a": 1}, "B": "a"}))
    );
}

#[test]
fn test_sequence_against_mapping() {
    assert_eq!(
        diff_json(json!([1]), json!({"0": 1})),
        Some(json!({"A": [1], "B": {"0": 1}}))
    );
}

#[test]
fn test_null_against_value() {
    assert_eq!(
        diff_json(json!({"k": null}), json!({"k": 0})),
        Some(json!({"k": {"A": null, "B": 0}}))
    );
}

#[test]
fn test_empty_containers() {
    assert_eq!(diff_json(json!({}), json!({})), None);
    assert_eq!(diff_json(json!([]), json!([])), None);
    assert_eq!(
        diff_json(json!({}), json!({"new": []})),
        Some(json!({"new": {"B": []}}))
    );
    assert_eq!(diff_json(json!([]), json!([1])), Some(json!({"A": [], "B": [1]})));
}

#[test]
fn test_integer_and_float_are_distinct() {
    assert_eq!(
        diff_json(json!({"n": 1}), json!({"n": 1.0})),
        Some(json!({"n": {"A": 1, "B": 1.0}}))
    );
}

#[test]
fn test_duplicates_are_not_counted() {
    assert_eq!(diff_json(json!(["a", "a", "b"]), json!(["b", "a"])), None);
}

#[test]
fn test_deeply_nested_change() {
    let mut from = json!("leaf-1");
    let mut to = json!("leaf-2");
    for depth in 0..64 {
        from = json!({ format!("level{}", depth): from });
        to = json!({ format!("level{}", depth): to });
    }

    let engine = DiffEngine::new(VersionLabel::from("A"), VersionLabel::from("B")).unwrap();
    let node = engine
        .compare(&ConfigTree::from(from), &ConfigTree::from(to))
        .unwrap();
    let changes = node.changes();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].path.len(), 64);
    assert_eq!(changes[0].path[0], "level63");
}

#[test]
fn test_unicode_keys_and_labels() {
    let engine = DiffEngine::new(
        VersionLabel::from("café.example VERSION 1"),
        VersionLabel::from("café.example VERSION 2"),
    )
    .unwrap();

    let node = engine
        .compare(
            &ConfigTree::from(json!({"北京": "旧"})),
            &ConfigTree::from(json!({"北京": "新"})),
        )
        .unwrap();

    assert_eq!(
        node.to_json(engine.from_label(), engine.to_label()),
        json!({"北京": {"café.example VERSION 1": "旧", "café.example VERSION 2": "新"}})
    );
}

#[test]
fn test_views_with_non_mapping_blocks() {
    let from: VersionView = serde_json::from_value(json!({"rules": [1, 2]})).unwrap();
    let to: VersionView = serde_json::from_value(json!({"rules": {"name": "default"}})).unwrap();

    let engine = DiffEngine::new(VersionLabel::from("A"), VersionLabel::from("B")).unwrap();
    let diff = engine.compare_views(&from, &to);
    assert_eq!(
        diff.to_json(),
        json!({"rules": {"A": [1, 2], "B": {"name": "default"}}})
    );
}
