//! JSON adapter.

use serde_json::Value;
use tracing::debug;

use super::{strip_position_suffix, ParseError};

/// Decodes JSON text into a generic value tree.
pub fn parse(text: &str) -> Result<Value, ParseError> {
    serde_json::from_str(text).map_err(|error| {
        debug!(line = error.line(), column = error.column(), "JSON parse failed");

        // Line 0 means the decoder had no position to offer.
        let position = if error.line() > 0 {
            Some((error.line(), error.column()))
        } else {
            None
        };

        ParseError::new(
            "JSON",
            strip_position_suffix(&error.to_string()),
            position,
        )
    })
}
