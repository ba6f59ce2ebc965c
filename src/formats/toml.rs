//! TOML adapter.

use serde_json::Value;
use tracing::debug;

use super::{offset_to_position, ParseError};

/// Decodes TOML text into a generic value tree. Datetimes are carried as
/// strings, which keeps the output inside the generic value vocabulary.
pub fn parse(text: &str) -> Result<Value, ParseError> {
    let document: toml::Value = toml::from_str(text).map_err(|error| {
        let position = error
            .span()
            .map(|span| offset_to_position(text, span.start));
        debug!(?position, "TOML parse failed");

        ParseError::new("TOML", error.message(), position)
    })?;

    serde_json::to_value(document)
        .map_err(|error| ParseError::new("TOML", error.to_string(), None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_valid_document() {
        let value = parse("name = \"Alice\"\n\n[server]\nport = 8080\n").unwrap();
        assert_eq!(value, json!({"name": "Alice", "server": {"port": 8080}}));
    }

    #[test]
    fn test_parse_arrays_and_floats() {
        let value = parse("scores = [1, 2, 3]\nratio = 0.5\n").unwrap();
        assert_eq!(value, json!({"scores": [1, 2, 3], "ratio": 0.5}));
    }

    #[test]
    fn test_parse_error_carries_position() {
        let error = parse("name = \"Alice\nport = 8080\n").unwrap_err();
        assert_eq!(error.format(), "TOML");
        let (line, _column) = error.position().expect("position");
        assert_eq!(line, 1);
    }
}
