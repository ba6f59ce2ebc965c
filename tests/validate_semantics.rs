//! Validation Semantics Tests
//!
//! End-to-end checks of the validate walk:
//! - Validation is deterministic and collects every independent mismatch
//! - Every error carries the exact path to the offending value
//! - Shape mismatches stop descent; length mismatches do not
//! - Extra keys are ignored; missing keys surface at the child path
//! - Type matching is exact (booleans are not integers)

use serde_json::json;
use shapecheck::schema::{Lengths, SchemaNode, ViolationKind};

// =============================================================================
// Helper Functions
// =============================================================================

fn account_schema() -> SchemaNode {
    SchemaNode::dict([
        ("username", SchemaNode::string()),
        ("code", SchemaNode::integer()),
        ("nickname", SchemaNode::optional(SchemaNode::string())),
    ])
}

fn roster_schema() -> SchemaNode {
    SchemaNode::list(SchemaNode::dict([
        ("username", SchemaNode::string()),
        (
            "realname",
            SchemaNode::optional(SchemaNode::dict([
                ("first", SchemaNode::string()),
                ("last", SchemaNode::string()),
            ])),
        ),
    ]))
}

fn error_paths(schema: &SchemaNode, data: &serde_json::Value) -> Vec<String> {
    schema
        .validate(Some(data))
        .iter()
        .map(|error| error.path().to_string())
        .collect()
}

// =============================================================================
// Determinism
// =============================================================================

/// Same data validates the same way every time against a shared schema.
#[test]
fn test_validation_is_deterministic() {
    let schema = account_schema();
    let doc = json!({"username": "A10N", "code": 123});

    for _ in 0..100 {
        assert!(schema.validate(Some(&doc)).is_empty());
    }
}

/// Invalid data fails with the same report every time.
#[test]
fn test_invalid_data_fails_consistently() {
    let schema = account_schema();
    let doc = json!({"username": 42});

    let first = schema.validate(Some(&doc));
    for _ in 0..100 {
        assert_eq!(schema.validate(Some(&doc)), first);
    }
}

// =============================================================================
// Path Correctness
// =============================================================================

/// One wrong leaf in a nested dict reports exactly one error at the full path.
#[test]
fn test_nested_wrong_type_path() {
    let schema = SchemaNode::dict([(
        "a",
        SchemaNode::dict([("b", SchemaNode::integer())]),
    )]);
    let report = schema.validate(Some(&json!({"a": {"b": "oops"}})));

    assert_eq!(report.len(), 1);
    let error = report.iter().next().unwrap();
    assert_eq!(error.path().to_string(), "a.b");
    assert!(matches!(error.kind(), ViolationKind::WrongType { .. }));
}

/// Errors inside list elements carry the element index in the path.
#[test]
fn test_list_element_error_path() {
    let schema = roster_schema();
    let data = json!([
        {"username": "Alon"},
        {"username": "A10N", "realname": {"last": "Krymgand"}}
    ]);
    assert_eq!(error_paths(&schema, &data), vec!["[1].realname.first"]);
}

// =============================================================================
// Completeness
// =============================================================================

/// Every independent leaf violation is reported in a single pass.
#[test]
fn test_all_independent_violations_reported() {
    let schema = account_schema();
    let report = schema.validate(Some(&json!({"username": 42, "nickname": 7})));

    // username wrong type, code missing, nickname wrong type.
    assert_eq!(report.len(), 3);
}

/// A sibling subtree's failure does not suppress other errors.
#[test]
fn test_bad_subtree_does_not_mask_siblings() {
    let schema = SchemaNode::dict([
        ("left", SchemaNode::dict([("x", SchemaNode::integer())])),
        ("right", SchemaNode::integer()),
    ]);
    let data = json!({"left": "not a dict", "right": "not an int"});
    assert_eq!(error_paths(&schema, &data), vec!["left", "right"]);
}

/// A shape mismatch is one error, with no cascading child errors.
#[test]
fn test_shape_mismatch_does_not_cascade() {
    let schema = roster_schema();
    for data in [json!(null), json!({}), json!({"username": "A10N"})] {
        let report = schema.validate(Some(&data));
        assert_eq!(report.len(), 1, "expected one error for {}", data);
        assert!(matches!(
            report.iter().next().unwrap().kind(),
            ViolationKind::WrongType { .. }
        ));
    }
}

// =============================================================================
// Missing vs Wrong Type
// =============================================================================

#[test]
fn test_missing_and_wrong_type_are_distinct() {
    let schema = SchemaNode::dict([("name", SchemaNode::string())]);

    let report = schema.validate(Some(&json!({})));
    assert_eq!(report.len(), 1);
    let error = report.iter().next().unwrap();
    assert_eq!(error.path().to_string(), "name");
    assert!(matches!(error.kind(), ViolationKind::Missing));

    let report = schema.validate(Some(&json!({"name": 5})));
    assert_eq!(report.len(), 1);
    let error = report.iter().next().unwrap();
    assert_eq!(error.path().to_string(), "name");
    assert!(matches!(error.kind(), ViolationKind::WrongType { .. }));
}

/// Null is a present value, not missing data.
#[test]
fn test_null_is_present_not_missing() {
    let schema = SchemaNode::dict([("name", SchemaNode::string())]);
    let report = schema.validate(Some(&json!({"name": null})));

    assert_eq!(report.len(), 1);
    assert!(matches!(
        report.iter().next().unwrap().kind(),
        ViolationKind::WrongType { .. }
    ));
}

// =============================================================================
// Extra Keys
// =============================================================================

#[test]
fn test_extra_keys_are_tolerated() {
    let schema = SchemaNode::dict([("x", SchemaNode::integer())]);
    assert!(schema.validate(Some(&json!({"x": 1, "y": 2}))).is_empty());
}

// =============================================================================
// List Lengths
// =============================================================================

#[test]
fn test_list_length_boundaries() {
    let schema = SchemaNode::list_with_lengths(
        SchemaNode::integer(),
        Lengths::OneOf(vec![1, 2, 3]),
    )
    .unwrap();

    for valid in [json!([1]), json!([1, 2]), json!([1, 2, 3])] {
        assert!(schema.validate(Some(&valid)).is_empty(), "{} should pass", valid);
    }

    for invalid in [json!([]), json!([1, 2, 3, 4])] {
        let report = schema.validate(Some(&invalid));
        assert_eq!(report.len(), 1, "{} should fail once", invalid);
        assert!(matches!(
            report.iter().next().unwrap().kind(),
            ViolationKind::ListLength { .. }
        ));
    }
}

#[test]
fn test_between_lengths() {
    let schema = SchemaNode::list_with_lengths(
        SchemaNode::number(),
        Lengths::Between(1, 3),
    )
    .unwrap();

    assert!(schema.validate(Some(&json!([21]))).is_empty());
    assert!(schema.validate(Some(&json!([1, 1.2]))).is_empty());
    assert!(schema.validate(Some(&json!([1.23, 123, 43]))).is_empty());
    assert_eq!(schema.validate(Some(&json!([]))).len(), 1);
    assert_eq!(schema.validate(Some(&json!([1, 2, 3, 4]))).len(), 1);
}

// =============================================================================
// Exact Type Policy
// =============================================================================

/// Booleans never satisfy an integer schema, by decision, not accident.
#[test]
fn test_boolean_is_not_an_integer() {
    let schema = SchemaNode::dict([("count", SchemaNode::integer())]);
    let report = schema.validate(Some(&json!({"count": true})));
    assert_eq!(report.len(), 1);
    assert!(matches!(
        report.iter().next().unwrap().kind(),
        ViolationKind::WrongType { .. }
    ));
}

#[test]
fn test_boolean_schema_rejects_numbers_and_strings() {
    let schema = SchemaNode::boolean();
    assert!(schema.validate(Some(&json!(true))).is_empty());
    assert!(schema.validate(Some(&json!(false))).is_empty());

    for data in [json!(""), json!("Hello"), json!(0), json!(100), json!(null), json!(0.0)] {
        assert_eq!(schema.validate(Some(&data)).len(), 1, "{} should fail", data);
    }
}

// =============================================================================
// Report Rendering
// =============================================================================

#[test]
fn test_report_renders_one_line_per_error() {
    let schema = account_schema();
    let report = schema.validate(Some(&json!({"username": 42})));
    let rendered = report.to_string();

    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "username - expected 'string' but got 'int'");
    assert_eq!(lines[1], "code - missing required value");
}

#[test]
fn test_root_errors_render_with_root_marker() {
    let report = SchemaNode::string().validate(None);
    assert_eq!(report.to_string(), "$root - missing required value");
}
