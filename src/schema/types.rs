//! Schema node definitions.
//!
//! A schema is a closed tree of [`SchemaNode`] variants, constructed once
//! and reusable across any number of validation calls (including
//! concurrently; nodes hold no interior mutability).
//!
//! Type matching is exact runtime-type membership, never coercion:
//! - a boolean is not an integer (`true` never satisfies [`SchemaNode::integer`]),
//! - `5` is `Int` and `5.0` is `Float`; use [`SchemaNode::number`] to accept
//!   either, mirroring how lenient numeric fields are usually declared.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use super::errors::{FailFast, SchemaError};
use crate::container::Cursor;

/// The runtime type of a generic value, as used in type checks and error
/// messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// JSON null (a present value, distinct from missing data).
    Null,
    /// Boolean.
    Bool,
    /// 64-bit integer (signed or unsigned).
    Int,
    /// 64-bit floating point.
    Float,
    /// UTF-8 string.
    String,
    /// Ordered sequence.
    Array,
    /// String-keyed object.
    Object,
}

impl ValueType {
    /// Classifies a value. Integers and floats are distinguished by how the
    /// decoder represented the number, so `5` is `Int` and `5.0` is `Float`.
    pub fn of(value: &Value) -> ValueType {
        match value {
            Value::Null => ValueType::Null,
            Value::Bool(_) => ValueType::Bool,
            Value::Number(n) => {
                if n.is_i64() || n.is_u64() {
                    ValueType::Int
                } else {
                    ValueType::Float
                }
            }
            Value::String(_) => ValueType::String,
            Value::Array(_) => ValueType::Array,
            Value::Object(_) => ValueType::Object,
        }
    }

    /// Returns the type name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            ValueType::Null => "null",
            ValueType::Bool => "bool",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::String => "string",
            ValueType::Array => "list",
            ValueType::Object => "dict",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A constraint over valid sequence lengths. An open predicate in spirit;
/// the closed set of variants below covers every constraint the library
/// hands out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Lengths {
    /// Any length is valid (the default).
    Any,
    /// Exactly `n` elements.
    Exactly(usize),
    /// `n` or more elements.
    AtLeast(usize),
    /// `n` or fewer elements.
    AtMost(usize),
    /// Between `min` and `max` elements, inclusive.
    Between(usize, usize),
    /// One of an explicit set of lengths.
    OneOf(Vec<usize>),
}

impl Lengths {
    /// Returns `true` when a sequence of `len` elements satisfies the
    /// constraint.
    pub fn contains(&self, len: usize) -> bool {
        match self {
            Lengths::Any => true,
            Lengths::Exactly(n) => len == *n,
            Lengths::AtLeast(n) => len >= *n,
            Lengths::AtMost(n) => len <= *n,
            Lengths::Between(min, max) => len >= *min && len <= *max,
            Lengths::OneOf(options) => options.contains(&len),
        }
    }

    /// Returns `true` when at least one length satisfies the constraint.
    pub fn is_satisfiable(&self) -> bool {
        match self {
            Lengths::Between(min, max) => min <= max,
            Lengths::OneOf(options) => !options.is_empty(),
            _ => true,
        }
    }
}

impl fmt::Display for Lengths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lengths::Any => write!(f, "any length"),
            Lengths::Exactly(n) => write!(f, "exactly {}", n),
            Lengths::AtLeast(n) => write!(f, "at least {}", n),
            Lengths::AtMost(n) => write!(f, "at most {}", n),
            Lengths::Between(min, max) => write!(f, "between {} and {}", min, max),
            Lengths::OneOf(options) => {
                let rendered: Vec<String> = options.iter().map(usize::to_string).collect();
                write!(f, "one of {}", rendered.join(", "))
            }
        }
    }
}

/// A node in a schema tree, describing one expected shape.
///
/// Composite variants own their children, so "every child is a valid
/// schema node" holds by construction. The remaining constructor-time
/// checks (non-empty type sets, satisfiable length constraints, defaults
/// that match their own schema) live in the constructor functions and
/// surface as [`SchemaError`].
#[derive(Debug, Clone)]
pub enum SchemaNode {
    /// A set of acceptable runtime types.
    Primitive {
        /// Accepted types, deduplicated and sorted for stable messages.
        types: Vec<ValueType>,
    },
    /// A child schema whose data may be absent, with an optional default
    /// substituted at dump time.
    Optional {
        /// The wrapped schema.
        node: Box<SchemaNode>,
        /// Default inserted by dump when the data is missing. Guaranteed to
        /// satisfy `node` (checked at construction).
        default: Option<Value>,
    },
    /// A homogeneous sequence with a length constraint.
    List {
        /// Schema every element must satisfy.
        element: Box<SchemaNode>,
        /// Valid sequence lengths.
        lengths: Lengths,
    },
    /// A fixed mapping from field name to child schema. Insertion order is
    /// the declared order used by the dump and validate walks.
    Dict {
        /// Declared fields.
        fields: IndexMap<String, SchemaNode>,
    },
    /// A fixed set of exact sentinel values, compared by equality.
    Options {
        /// Accepted values.
        choices: Vec<Value>,
    },
    /// Matches every present value.
    Any,
}

impl SchemaNode {
    /// A primitive schema accepting the given set of runtime types.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::EmptyTypeSet`] when no types are given.
    pub fn primitive(types: impl IntoIterator<Item = ValueType>) -> Result<Self, SchemaError> {
        let mut types: Vec<ValueType> = types.into_iter().collect();
        types.sort();
        types.dedup();

        if types.is_empty() {
            return Err(SchemaError::EmptyTypeSet);
        }

        Ok(SchemaNode::Primitive { types })
    }

    /// A schema accepting strings only.
    pub fn string() -> Self {
        SchemaNode::Primitive {
            types: vec![ValueType::String],
        }
    }

    /// A schema accepting integers only. Booleans and floats are rejected.
    pub fn integer() -> Self {
        SchemaNode::Primitive {
            types: vec![ValueType::Int],
        }
    }

    /// A schema accepting floats only. `5` decodes as an integer and is
    /// rejected; use [`SchemaNode::number`] for lenient numeric fields.
    pub fn float() -> Self {
        SchemaNode::Primitive {
            types: vec![ValueType::Float],
        }
    }

    /// A schema accepting integers or floats.
    pub fn number() -> Self {
        SchemaNode::Primitive {
            types: vec![ValueType::Int, ValueType::Float],
        }
    }

    /// A schema accepting booleans only.
    pub fn boolean() -> Self {
        SchemaNode::Primitive {
            types: vec![ValueType::Bool],
        }
    }

    /// Wraps a schema so that missing data is acceptable.
    pub fn optional(node: SchemaNode) -> Self {
        SchemaNode::Optional {
            node: Box::new(node),
            default: None,
        }
    }

    /// Wraps a schema so that missing data is replaced by `default` at dump
    /// time.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidDefault`] when the default does not
    /// satisfy the wrapped schema. A default, once accepted, always passes
    /// its own schema.
    pub fn optional_with_default(node: SchemaNode, default: Value) -> Result<Self, SchemaError> {
        let cursor = Cursor::head(Some(&default));
        node.validate_at(&cursor, &mut FailFast)
            .map_err(SchemaError::InvalidDefault)?;

        Ok(SchemaNode::Optional {
            node: Box::new(node),
            default: Some(default),
        })
    }

    /// A sequence schema with no length constraint.
    pub fn list(element: SchemaNode) -> Self {
        SchemaNode::List {
            element: Box::new(element),
            lengths: Lengths::Any,
        }
    }

    /// A sequence schema with a length constraint.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnsatisfiableLengths`] when no length can
    /// satisfy the constraint.
    pub fn list_with_lengths(element: SchemaNode, lengths: Lengths) -> Result<Self, SchemaError> {
        if !lengths.is_satisfiable() {
            return Err(SchemaError::UnsatisfiableLengths(lengths));
        }

        Ok(SchemaNode::List {
            element: Box::new(element),
            lengths,
        })
    }

    /// An object schema with the given declared fields. Declaration order
    /// is preserved and drives dump output ordering.
    pub fn dict<K: Into<String>>(fields: impl IntoIterator<Item = (K, SchemaNode)>) -> Self {
        SchemaNode::Dict {
            fields: fields
                .into_iter()
                .map(|(key, node)| (key.into(), node))
                .collect(),
        }
    }

    /// An enumeration schema accepting exactly the given values.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::EmptyOptions`] when no choices are given.
    pub fn options(choices: impl IntoIterator<Item = Value>) -> Result<Self, SchemaError> {
        let choices: Vec<Value> = choices.into_iter().collect();
        if choices.is_empty() {
            return Err(SchemaError::EmptyOptions);
        }

        Ok(SchemaNode::Options { choices })
    }

    /// A schema that accepts any present value.
    pub fn any() -> Self {
        SchemaNode::Any
    }
}
