//! shapecheck - strict, path-aware structural validation
//!
//! A schema is an immutable tree of [`schema::SchemaNode`]s describing the
//! expected shape of nested data. Two walks are supported:
//!
//! - **validate**: collects every mismatch between data and schema into a
//!   path-tagged [`schema::ErrorReport`] instead of failing on the first one.
//! - **dump**: projects raw input through the schema, dropping fields the
//!   schema does not declare and substituting defaults for optional fields.
//!
//! [`validation::Validation`] wires both walks together behind one entry
//! point, and [`formats`] decodes JSON/YAML/TOML text into the generic value
//! tree the core operates on.

pub mod container;
pub mod formats;
pub mod schema;
pub mod validation;

pub use schema::{ErrorReport, SchemaNode, ValidationError};
pub use validation::Validation;
