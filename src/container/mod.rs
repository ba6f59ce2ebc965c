//! Value-tree containers and cursors.
//!
//! A [`HeadContainer`] owns the root value of a validation or dump call.
//! A [`Cursor`] is a non-owning pointer chain into that tree: each cursor
//! holds a reference to its parent plus the segment that was taken to reach
//! it, so the full path is recoverable from any cursor without the walk
//! threading path strings by hand.
//!
//! A missing key or index resolves to `None`, never to an error and never
//! to JSON null. `Some(Value::Null)` is a legitimate present value.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// One step from a parent value to a child value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Segment {
    /// An object field name.
    Key(String),
    /// A sequence position.
    Index(usize),
}

impl Segment {
    /// Builds a key segment from anything string-like.
    pub fn key(key: impl Into<String>) -> Self {
        Segment::Key(key.into())
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => write!(f, "{}", key),
            Segment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// The ordered sequence of segments from the head container to a value.
///
/// Renders as `$root` when empty, otherwise in the familiar
/// `server.hosts[0].name` form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Path(Vec<Segment>);

impl Path {
    /// The empty path, pointing at the root value itself.
    pub fn root() -> Self {
        Path(Vec::new())
    }

    /// Returns the segments in root-to-leaf order.
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    /// Returns `true` when the path points at the root value.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Segment>> for Path {
    fn from(segments: Vec<Segment>) -> Self {
        Path(segments)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "$root");
        }

        for (position, segment) in self.0.iter().enumerate() {
            match segment {
                Segment::Key(key) if position > 0 => write!(f, ".{}", key)?,
                _ => write!(f, "{}", segment)?,
            }
        }

        Ok(())
    }
}

/// The root container. Only this instance owns data; every cursor derived
/// from it is a borrowed view.
///
/// `None` means "no value present", which is distinct from a present
/// `Value::Null`.
#[derive(Debug, Clone, Default)]
pub struct HeadContainer {
    data: Option<Value>,
}

impl HeadContainer {
    /// Creates an empty head container (no value present).
    pub fn new() -> Self {
        Self { data: None }
    }

    /// Creates a head container that already holds a root value.
    pub fn with_data(data: Value) -> Self {
        Self { data: Some(data) }
    }

    /// Returns the root value, if any.
    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// Consumes the container and returns the root value, if any.
    pub fn into_data(self) -> Option<Value> {
        self.data
    }

    /// Resolves a path to the value it points at. A missing key or index
    /// anywhere along the path yields `None`.
    pub fn read(&self, path: &[Segment]) -> Option<&Value> {
        let mut current = self.data.as_ref()?;
        for segment in path {
            current = match segment {
                Segment::Key(key) => current.get(key.as_str())?,
                Segment::Index(index) => current.get(*index)?,
            };
        }
        Some(current)
    }

    /// Writes a value at the given path inside the root structure.
    ///
    /// Object keys are created when absent. Writing at an array index equal
    /// to the current length appends, which is how the dump walk grows
    /// output sequences one element at a time. Callers write parents before
    /// children; a path whose parent does not resolve to a matching
    /// container shape is left untouched.
    pub fn write(&mut self, path: &[Segment], value: Value) {
        let Some((last, parents)) = path.split_last() else {
            self.data = Some(value);
            return;
        };

        let Some(root) = self.data.as_mut() else {
            return;
        };

        let mut current = root;
        for segment in parents {
            current = match (segment, current) {
                (Segment::Key(key), Value::Object(map)) => {
                    match map.get_mut(key.as_str()) {
                        Some(slot) => slot,
                        None => return,
                    }
                }
                (Segment::Index(index), Value::Array(items)) => {
                    match items.get_mut(*index) {
                        Some(slot) => slot,
                        None => return,
                    }
                }
                _ => return,
            };
        }

        match (last, current) {
            (Segment::Key(key), Value::Object(map)) => {
                map.insert(key.clone(), value);
            }
            (Segment::Index(index), Value::Array(items)) => {
                if *index == items.len() {
                    items.push(value);
                } else if let Some(slot) = items.get_mut(*index) {
                    *slot = value;
                }
            }
            _ => {}
        }
    }

    /// Returns a cursor positioned at the root value.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::head(self.data.as_ref())
    }
}

/// A lazy, non-owning pointer into a value tree.
///
/// Child cursors are O(1) to create: the child's data is resolved once from
/// the parent's already-resolved data, and the path is reconstructed only
/// when asked for (typically when an error record is built).
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    parent: Option<&'a Cursor<'a>>,
    segment: Option<&'a Segment>,
    data: Option<&'a Value>,
}

impl<'a> Cursor<'a> {
    /// Creates a head cursor over an optional root value.
    pub fn head(data: Option<&'a Value>) -> Self {
        Cursor {
            parent: None,
            segment: None,
            data,
        }
    }

    /// Returns the value this cursor points at, or `None` when the key or
    /// index it was derived through does not exist in the data.
    pub fn data(&self) -> Option<&'a Value> {
        self.data
    }

    /// Creates the child cursor one segment below this one.
    pub fn child<'b>(&'b self, segment: &'b Segment) -> Cursor<'b> {
        let data = self.data.and_then(|value| match segment {
            Segment::Key(key) => value.get(key.as_str()),
            Segment::Index(index) => value.get(*index),
        });

        Cursor {
            parent: Some(self),
            segment: Some(segment),
            data,
        }
    }

    /// Reconstructs the path from the head container to this cursor by
    /// walking the parent chain. O(depth).
    pub fn path(&self) -> Path {
        let mut segments = Vec::new();
        let mut current = Some(self);

        while let Some(cursor) = current {
            if let Some(segment) = cursor.segment {
                segments.push(segment.clone());
            }
            current = cursor.parent;
        }

        segments.reverse();
        Path(segments)
    }

    /// The segments this cursor's children would be reached through,
    /// following the data's own order: indices `0..len` for sequences and
    /// the existing keys for objects. Scalars and missing data have no
    /// children.
    ///
    /// Note this is data order, not schema-declared order; the validate and
    /// dump walks iterate schema-declared keys themselves.
    pub fn child_segments(&self) -> Vec<Segment> {
        match self.data {
            Some(Value::Array(items)) => (0..items.len()).map(Segment::Index).collect(),
            Some(Value::Object(map)) => map.keys().cloned().map(Segment::Key).collect(),
            _ => Vec::new(),
        }
    }
}
