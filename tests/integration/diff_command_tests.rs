//! Integration tests for the diff, show and list commands

use crate::common::{assertions, sample_data, CliTestRunner, TestFixture};
use propdiff::PropdiffError;
use serde_json::json;
use std::fs;

fn runner_with_example() -> CliTestRunner {
    let runner = CliTestRunner::new().unwrap();
    runner
        .fixture()
        .add_property(&sample_data::example_property())
        .unwrap();
    runner
}

#[test]
fn test_diff_writes_json_output() {
    let runner = runner_with_example();
    let output = runner.fixture().root().join("diff.json");

    runner.expect_success(&[
        "diff",
        "STAGING",
        "LATEST",
        "--prop",
        sample_data::PROPERTY,
        "--output",
        output.to_str().unwrap(),
    ]);

    assertions::assert_file_exists_and_not_empty(&output);
    let diff = assertions::read_json(&output);
    let object = diff.as_object().unwrap();

    assert!(object.contains_key("rules"));
    assert!(object.contains_key("meta"));
    assert!(!object.contains_key("hostnames"));
    assert_eq!(
        diff["meta"]["propertyVersion"],
        json!({
            "www.example.com VERSION 3": 3,
            "www.example.com VERSION 5": 5
        })
    );
}

#[test]
fn test_diff_cross_property_references() {
    let runner = runner_with_example();
    runner
        .fixture()
        .add_property(&sample_data::stable_property("api.example.com"))
        .unwrap();
    let output = runner.fixture().root().join("cross.json");

    runner.expect_success(&[
        "diff",
        "www.example.com@3",
        "api.example.com@PRODUCTION",
        "--output",
        output.to_str().unwrap(),
    ]);

    let diff = assertions::read_json(&output);
    assert_eq!(
        diff,
        json!({
            "meta": {
                "propertyVersion": {
                    "www.example.com VERSION 3": 3,
                    "api.example.com VERSION 1": 1
                }
            }
        })
    );
}

#[test]
fn test_diff_same_version_is_rejected() {
    let runner = runner_with_example();

    let err = runner.expect_failure(&["diff", "LATEST", "5", "--prop", sample_data::PROPERTY]);
    assert!(matches!(err, PropdiffError::DuplicateLabels { .. }));
}

#[test]
fn test_diff_unassigned_alias_fails() {
    let runner = runner_with_example();

    let err = runner.expect_failure(&["diff", "PRODUCTION", "LATEST", "--prop", sample_data::PROPERTY]);
    assert!(matches!(err, PropdiffError::VersionNotFound { .. }));
}

#[test]
fn test_diff_unknown_literal_version_fails() {
    let runner = runner_with_example();

    let err = runner.expect_failure(&["diff", "3", "42", "--prop", sample_data::PROPERTY]);
    assert!(matches!(err, PropdiffError::VersionNotFound { ref selector, .. } if selector == "42"));
}

#[test]
fn test_diff_unknown_property_fails() {
    let runner = runner_with_example();

    let err = runner.expect_failure(&["diff", "LATEST", "STAGING", "--prop", "nope.example.com"]);
    assert!(matches!(err, PropdiffError::PropertyNotFound { .. }));
}

#[test]
fn test_diff_rejects_bare_selectors_without_property() {
    let runner = runner_with_example();

    let err = runner.expect_failure(&["diff", "LATEST", "STAGING"]);
    assert!(matches!(err, PropdiffError::InvalidInput { .. }));
}

#[test]
fn test_diff_rejects_unknown_modes() {
    let runner = runner_with_example();

    let err = runner.expect_failure(&[
        "diff", "3", "5", "--prop", sample_data::PROPERTY, "--prune", "sideways",
    ]);
    assert!(matches!(err, PropdiffError::InvalidInput { .. }));

    let err = runner.expect_failure(&[
        "diff", "3", "5", "--prop", sample_data::PROPERTY, "--format", "xml",
    ]);
    assert!(matches!(err, PropdiffError::InvalidInput { .. }));
}

#[test]
fn test_diff_uses_configured_format() {
    let runner = runner_with_example();
    fs::write(runner.fixture().store.config_path(), r#"{"format": "json"}"#).unwrap();

    runner.expect_success(&["diff", "3", "5", "--prop", sample_data::PROPERTY]);
}

#[test]
fn test_show_and_list_commands() {
    let runner = runner_with_example();

    runner.expect_success(&["list"]);
    runner.expect_success(&["list", "--format", "json"]);
    runner.expect_success(&["show", sample_data::PROPERTY]);
    runner.expect_success(&["show", sample_data::PROPERTY, "--format", "json"]);

    let err = runner.expect_failure(&["show", "missing.example.com"]);
    assert!(matches!(err, PropdiffError::PropertyNotFound { .. }));
}

#[test]
fn test_read_only_commands_require_a_store() {
    let runner = runner_with_example();
    let empty = TestFixture::new_empty().unwrap();
    // Bound the upward search to the temporary directory
    fs::create_dir_all(empty.root().join(".git")).unwrap();
    let target = empty.root().to_str().unwrap();

    for args in [
        vec!["list", "--store", target],
        vec!["show", sample_data::PROPERTY, "--store", target],
        vec!["diff", "3", "5", "--prop", sample_data::PROPERTY, "--store", target],
    ] {
        let err = runner.expect_failure(&args);
        assert!(matches!(err, PropdiffError::Store(_)));
    }
    assert!(!empty.store.store_dir.exists());
}
