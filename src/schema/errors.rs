//! Validation error taxonomy and error accumulation.
//!
//! A [`ValidationError`] is an immutable record: the path to the offending
//! value plus a [`ViolationKind`] that renders the human-readable message.
//! Errors are fed into an [`ErrorSink`], which decides the accumulation
//! policy: [`ErrorReport`] collects everything so a single walk surfaces
//! every independent mismatch, while [`FailFast`] aborts the walk at the
//! first one by returning the record as `Err` (propagated with `?`, no
//! unwinding tricks).

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use super::types::{Lengths, ValueType};
use crate::container::Path;
use crate::formats::ParseError;

/// Joins a rendered list into `'a', 'b' or 'c'` for error messages.
fn readable_list(items: &[String]) -> String {
    match items.split_last() {
        None => String::new(),
        Some((last, [])) => format!("'{}'", last),
        Some((last, body)) => {
            let body: Vec<String> = body.iter().map(|item| format!("'{}'", item)).collect();
            format!("{} or '{}'", body.join(", "), last)
        }
    }
}

/// Renders a value for an options-mismatch message.
fn readable_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// What went wrong at one location.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    /// A required location has no value.
    Missing,
    /// A value is present but its runtime type is not accepted.
    WrongType {
        /// Accepted types, sorted.
        expected: Vec<ValueType>,
        /// The type actually found.
        got: ValueType,
    },
    /// A value is present but equals none of the accepted instances.
    InvalidOption {
        /// Accepted values.
        expected: Vec<Value>,
        /// The value actually found, absent when the location was missing.
        got: Option<Value>,
    },
    /// A sequence is present and well-typed but its length is not accepted.
    ListLength {
        /// The declared constraint.
        lengths: Lengths,
        /// The length actually found.
        got: usize,
    },
    /// An external adapter could not decode the raw input. Fatal: the walk
    /// never ran.
    Parsing(ParseError),
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::Missing => write!(f, "missing required value"),
            ViolationKind::WrongType { expected, got } => {
                let names: Vec<String> =
                    expected.iter().map(|t| t.name().to_string()).collect();
                write!(f, "expected {} but got '{}'", readable_list(&names), got)
            }
            ViolationKind::InvalidOption { expected, got } => {
                let choices: Vec<String> = expected.iter().map(readable_value).collect();
                match got {
                    Some(value) => write!(
                        f,
                        "expected {} but got '{}'",
                        readable_list(&choices),
                        readable_value(value)
                    ),
                    None => write!(f, "expected {} but got nothing", readable_list(&choices)),
                }
            }
            ViolationKind::ListLength { lengths, got } => {
                write!(f, "list length {} is not {}", got, lengths)
            }
            ViolationKind::Parsing(error) => write!(f, "{}", error),
        }
    }
}

/// A single path-tagged mismatch between data and schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    path: Path,
    kind: ViolationKind,
}

impl ValidationError {
    /// Builds an error record from a path and a violation.
    pub fn new(path: Path, kind: ViolationKind) -> Self {
        Self { path, kind }
    }

    /// The path from the root value to the offending location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The violation at that location.
    pub fn kind(&self) -> &ViolationKind {
        &self.kind
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.path, self.kind)
    }
}

impl std::error::Error for ValidationError {}

/// Accumulation policy for validation errors.
///
/// `register` either absorbs the record (collect-all) and returns `Ok`, or
/// hands it back as `Err` to unwind the walk (fail-fast). Walk code calls
/// `sink.register(error)?` and never needs to know which policy is active.
pub trait ErrorSink {
    /// Feeds one error record into the sink.
    fn register(&mut self, error: ValidationError) -> Result<(), ValidationError>;
}

/// Collects every registered error in walk order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ErrorReport {
    errors: Vec<ValidationError>,
}

impl ErrorReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a report holding exactly one error. Used for fatal parse
    /// failures, which short-circuit the walks entirely.
    pub fn single(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    /// Iterates the collected errors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    /// Number of collected errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns `true` when no errors were collected.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl ErrorSink for ErrorReport {
    fn register(&mut self, error: ValidationError) -> Result<(), ValidationError> {
        self.errors.push(error);
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ErrorReport {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for ErrorReport {
    /// One line per error: `<path> - <message>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, error) in self.errors.iter().enumerate() {
            if position > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

/// Aborts the walk at the first registered error.
///
/// Used internally to check optional defaults at construction time and
/// exposed through `SchemaNode::ensure`. The top-level default is always
/// collect-all so every mismatch is discoverable in one pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailFast;

impl ErrorSink for FailFast {
    fn register(&mut self, error: ValidationError) -> Result<(), ValidationError> {
        Err(error)
    }
}

/// A schema that could not be constructed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// An optional node's default value does not satisfy the wrapped schema.
    #[error("default value does not satisfy the wrapped schema: {0}")]
    InvalidDefault(ValidationError),
    /// A primitive node was given no accepted types.
    #[error("a primitive schema needs at least one accepted type")]
    EmptyTypeSet,
    /// An options node was given no accepted values.
    #[error("an options schema needs at least one accepted value")]
    EmptyOptions,
    /// A list length constraint that no length can satisfy.
    #[error("length constraint '{0}' matches no possible length")]
    UnsatisfiableLengths(Lengths),
}
