//! Schema object model and the two tree walks.
//!
//! # Design Principles
//!
//! - Schemas are immutable after construction and reusable across calls
//! - Validation collects every independent mismatch in one pass
//! - Every error carries the exact path to the offending value
//! - Exact type matching; no coercion, no implicit defaults
//! - Dump projects, validate judges; neither does the other's job

mod dump;
mod errors;
mod types;
mod validator;

pub use errors::{
    ErrorReport, ErrorSink, FailFast, SchemaError, ValidationError, ViolationKind,
};
pub use types::{Lengths, SchemaNode, ValueType};
