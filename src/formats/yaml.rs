//! YAML adapter.

use serde_json::Value;
use tracing::debug;

use super::{strip_position_suffix, ParseError};

/// Decodes YAML text into a generic value tree. Keys must be strings; YAML
/// documents with non-string keys are rejected as parse failures.
pub fn parse(text: &str) -> Result<Value, ParseError> {
    serde_yaml::from_str(text).map_err(|error| {
        let position = error
            .location()
            .map(|location| (location.line(), location.column()));
        debug!(?position, "YAML parse failed");

        ParseError::new(
            "YAML",
            strip_position_suffix(&error.to_string()),
            position,
        )
    })
}
