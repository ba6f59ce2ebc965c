//! File-format adapters.
//!
//! Each adapter decodes raw text into the generic value tree the core
//! operates on (maps with string keys, sequences, strings, numbers,
//! booleans, null) or produces a [`ParseError`] carrying a human-readable
//! message and, when the decoder supplies one, a 1-based line/column
//! position. The core treats a parse error as fatal and never runs the
//! dump or validate walks over undecodable input.

mod json;
mod toml;
mod yaml;

use std::fmt;
use std::fs;
use std::path::Path as FsPath;

use serde::Serialize;
use serde_json::Value;

pub use self::json::parse as parse_json;
pub use self::toml::parse as parse_toml;
pub use self::yaml::parse as parse_yaml;

/// Failure to decode raw input into a value tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseError {
    format: &'static str,
    message: String,
    position: Option<(usize, usize)>,
}

impl ParseError {
    pub(crate) fn new(
        format: &'static str,
        message: impl Into<String>,
        position: Option<(usize, usize)>,
    ) -> Self {
        Self {
            format,
            message: message.into(),
            position,
        }
    }

    /// The format that failed to decode ("JSON", "YAML", "TOML", "file").
    pub fn format(&self) -> &'static str {
        self.format
    }

    /// The decoder's message, stripped of any position suffix.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// 1-based (line, column) of the failure, when the decoder supplied one.
    pub fn position(&self) -> Option<(usize, usize)> {
        self.position
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {}: {}", self.format, self.message)?;
        if let Some((line, column)) = self.position {
            write!(f, " (line {}, column {})", line, column)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Strips a trailing ` at line L column C` suffix that serde decoders embed
/// in their messages, so the position is not rendered twice.
pub(crate) fn strip_position_suffix(message: &str) -> &str {
    match message.rfind(" at line ") {
        Some(index) => &message[..index],
        None => message,
    }
}

/// Converts a byte offset into a 1-based (line, column) position.
pub(crate) fn offset_to_position(text: &str, offset: usize) -> (usize, usize) {
    let clamped = offset.min(text.len());
    let prefix = &text[..clamped];
    let line = prefix.matches('\n').count() + 1;
    let column = match prefix.rfind('\n') {
        Some(newline) => clamped - newline,
        None => clamped + 1,
    };
    (line, column)
}

/// Loads and decodes a file, dispatching on its extension: `.json`,
/// `.yaml`/`.yml` or `.toml`. I/O failures and unknown extensions map to
/// [`ParseError`] like any decode failure.
pub fn load_path(path: &FsPath) -> Result<Value, ParseError> {
    let text = fs::read_to_string(path)
        .map_err(|error| ParseError::new("file", error.to_string(), None))?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("json") => parse_json(&text),
        Some("yaml") | Some("yml") => parse_yaml(&text),
        Some("toml") => parse_toml(&text),
        _ => Err(ParseError::new(
            "file",
            format!("unsupported file extension for '{}'", path.display()),
            None,
        )),
    }
}
