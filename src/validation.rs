//! Validation/dump orchestration.
//!
//! [`Validation`] is the top-level driver: it wires a schema, an input
//! value and an error report together, running the dump pass first and the
//! validate pass over the dumped result. A fatal parse error from a format
//! adapter skips both passes and surfaces as the single error in the
//! report.

use std::path::Path as FsPath;

use serde_json::Value;
use tracing::debug;

use crate::container::{Cursor, Path};
use crate::formats::{self, ParseError};
use crate::schema::{ErrorReport, SchemaNode, ValidationError, ViolationKind};

/// The outcome of validating one input against one schema.
///
/// Holds the original input, the normalized (dumped) value and every
/// mismatch found. Scoped to a single call; the schema itself stays
/// reusable.
#[derive(Debug, Clone)]
pub struct Validation {
    original: Option<Value>,
    data: Option<Value>,
    errors: ErrorReport,
}

impl Validation {
    /// Dumps `data` through `schema`, then validates the dumped value.
    pub fn new(schema: &SchemaNode, data: Option<Value>) -> Self {
        let dumped = schema.dump(data.as_ref());

        let mut errors = ErrorReport::new();
        let cursor = Cursor::head(dumped.as_ref());
        let _ = schema.validate_at(&cursor, &mut errors);

        debug!(errors = errors.len(), "validation finished");

        Self {
            original: data,
            data: dumped,
            errors,
        }
    }

    /// Runs a validation over an adapter's output. A parse error is fatal:
    /// neither walk runs and the report holds exactly that one error.
    pub fn from_parsed(schema: &SchemaNode, parsed: Result<Value, ParseError>) -> Self {
        match parsed {
            Ok(value) => Self::new(schema, Some(value)),
            Err(error) => {
                debug!(%error, "input could not be decoded");
                Self {
                    original: None,
                    data: None,
                    errors: ErrorReport::single(ValidationError::new(
                        Path::root(),
                        ViolationKind::Parsing(error),
                    )),
                }
            }
        }
    }

    /// Decodes JSON text and validates it.
    pub fn from_json(schema: &SchemaNode, text: &str) -> Self {
        Self::from_parsed(schema, formats::parse_json(text))
    }

    /// Decodes YAML text and validates it.
    pub fn from_yaml(schema: &SchemaNode, text: &str) -> Self {
        Self::from_parsed(schema, formats::parse_yaml(text))
    }

    /// Decodes TOML text and validates it.
    pub fn from_toml(schema: &SchemaNode, text: &str) -> Self {
        Self::from_parsed(schema, formats::parse_toml(text))
    }

    /// Loads a file, dispatching the decoder on the extension, and
    /// validates its contents.
    pub fn from_path(schema: &SchemaNode, path: &FsPath) -> Self {
        Self::from_parsed(schema, formats::load_path(path))
    }

    /// The normalized value: schema-relevant structure only, with optional
    /// defaults filled in. `None` when the input was missing, produced
    /// nothing, or failed to parse.
    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// The input exactly as given, before any projection.
    pub fn original(&self) -> Option<&Value> {
        self.original.as_ref()
    }

    /// Every mismatch found, in walk order.
    pub fn errors(&self) -> &ErrorReport {
        &self.errors
    }

    /// Returns `true` when no mismatches were found.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Consumes the validation and returns the normalized value, if any.
    pub fn into_data(self) -> Option<Value> {
        self.data
    }
}
