//! Recursive validation walk.
//!
//! Validation semantics:
//! - every independent violation is reported; one bad subtree never
//!   suppresses its siblings,
//! - a shape mismatch on a composite node (a non-list where a list is
//!   expected, a non-dict where a dict is expected) is reported once and
//!   the subtree is not descended into, so no cascading errors,
//! - a wrong list length is reported but elements are still checked,
//! - dict keys present in the data but absent from the schema are ignored,
//! - type matching is exact; no coercion, no defaults, no nulls-for-missing.
//!
//! The walk never fails on its own: errors flow into the supplied
//! [`ErrorSink`], and only a fail-fast sink turns the walk's `Result` into
//! an early `Err`.

use serde_json::Value;

use super::errors::{ErrorReport, ErrorSink, ValidationError, ViolationKind};
use super::types::{SchemaNode, ValueType};
use crate::container::{Cursor, Segment};

impl SchemaNode {
    /// Validates `data` and collects every mismatch into a report.
    ///
    /// Pass `None` to validate "no value", which fails against everything
    /// except an optional schema.
    pub fn validate(&self, data: Option<&Value>) -> ErrorReport {
        let mut report = ErrorReport::new();
        let cursor = Cursor::head(data);

        // A collect-all sink never raises, so the walk cannot fail here.
        let _ = self.validate_at(&cursor, &mut report);

        report
    }

    /// Validates `data` and stops at the first mismatch.
    pub fn ensure(&self, data: Option<&Value>) -> Result<(), ValidationError> {
        let cursor = Cursor::head(data);
        self.validate_at(&cursor, &mut super::errors::FailFast)
    }

    /// Validates the value under `cursor`, registering mismatches into
    /// `sink`. Returns `Err` only when the sink itself raises.
    ///
    /// Always consults the cursor rather than a pre-extracted value, so
    /// every registered error carries the exact path that produced it.
    pub(crate) fn validate_at<S: ErrorSink>(
        &self,
        cursor: &Cursor<'_>,
        sink: &mut S,
    ) -> Result<(), ValidationError> {
        match self {
            SchemaNode::Primitive { types } => match cursor.data() {
                None => sink.register(missing(cursor)),
                Some(value) => {
                    let got = ValueType::of(value);
                    if types.contains(&got) {
                        Ok(())
                    } else {
                        sink.register(wrong_type(cursor, types.clone(), got))
                    }
                }
            },

            SchemaNode::Optional { node, .. } => match cursor.data() {
                // Absence is fine for an optional value.
                None => Ok(()),
                Some(_) => node.validate_at(cursor, sink),
            },

            SchemaNode::List { element, lengths } => match cursor.data() {
                None => sink.register(missing(cursor)),
                Some(Value::Array(items)) => {
                    if !lengths.contains(items.len()) {
                        // Reported, but elements are still checked below.
                        sink.register(ValidationError::new(
                            cursor.path(),
                            ViolationKind::ListLength {
                                lengths: lengths.clone(),
                                got: items.len(),
                            },
                        ))?;
                    }

                    for segment in cursor.child_segments() {
                        let child = cursor.child(&segment);
                        element.validate_at(&child, sink)?;
                    }
                    Ok(())
                }
                // Not a sequence: one shape error, no descent.
                Some(value) => sink.register(wrong_type(
                    cursor,
                    vec![ValueType::Array],
                    ValueType::of(value),
                )),
            },

            SchemaNode::Dict { fields } => match cursor.data() {
                None => sink.register(missing(cursor)),
                Some(Value::Object(_)) => {
                    // Schema-declared keys in declared order; data keys the
                    // schema does not mention are ignored. A declared key
                    // absent from the data resolves to a missing child and
                    // surfaces through the child schema's own check.
                    for (key, node) in fields {
                        let segment = Segment::key(key.clone());
                        let child = cursor.child(&segment);
                        node.validate_at(&child, sink)?;
                    }
                    Ok(())
                }
                Some(value) => sink.register(wrong_type(
                    cursor,
                    vec![ValueType::Object],
                    ValueType::of(value),
                )),
            },

            SchemaNode::Options { choices } => match cursor.data() {
                Some(value) if choices.iter().any(|choice| choice == value) => Ok(()),
                other => sink.register(ValidationError::new(
                    cursor.path(),
                    ViolationKind::InvalidOption {
                        expected: choices.clone(),
                        got: other.cloned(),
                    },
                )),
            },

            SchemaNode::Any => match cursor.data() {
                None => sink.register(missing(cursor)),
                Some(_) => Ok(()),
            },
        }
    }
}

fn missing(cursor: &Cursor<'_>) -> ValidationError {
    ValidationError::new(cursor.path(), ViolationKind::Missing)
}

fn wrong_type(cursor: &Cursor<'_>, expected: Vec<ValueType>, got: ValueType) -> ValidationError {
    ValidationError::new(cursor.path(), ViolationKind::WrongType { expected, got })
}
