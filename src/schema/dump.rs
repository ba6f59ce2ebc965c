//! Projection ("dump") walk.
//!
//! Dump copies input data into a fresh head container, keeping only the
//! structure the schema declares: unknown dict keys are dropped, optional
//! defaults are substituted, everything else is written through verbatim.
//! Dump never judges values; a wrong type or invalid option survives the
//! projection and is caught by the subsequent validate pass.
//!
//! Dump is idempotent: projecting an already-normalized value changes
//! nothing.

use serde_json::Value;

use super::types::SchemaNode;
use crate::container::{HeadContainer, Segment};

impl SchemaNode {
    /// Projects `data` through the schema and returns the normalized value.
    /// `None` in means "no value"; `None` out means the projection produced
    /// nothing (missing input without a default).
    pub fn dump(&self, data: Option<&Value>) -> Option<Value> {
        let mut head = HeadContainer::new();
        let mut path = Vec::new();
        self.dump_at(&mut head, &mut path, data);
        head.into_data()
    }

    /// Writes the schema-relevant projection of `data` at `path` inside
    /// `head`. Parents are always written before their children, which is
    /// what lets `HeadContainer::write` resolve every intermediate step.
    pub(crate) fn dump_at(
        &self,
        head: &mut HeadContainer,
        path: &mut Vec<Segment>,
        data: Option<&Value>,
    ) {
        match self {
            // No coercion at dump time; present data is written verbatim.
            SchemaNode::Primitive { .. } => {
                if let Some(value) = data {
                    head.write(path, value.clone());
                }
            }

            SchemaNode::Optional { default, .. } => {
                let resolved = data.or(default.as_ref());
                if let Some(value) = resolved {
                    head.write(path, value.clone());
                }
            }

            SchemaNode::List { element, .. } => match data {
                Some(Value::Array(items)) => {
                    head.write(path, Value::Array(Vec::new()));
                    for (index, item) in items.iter().enumerate() {
                        path.push(Segment::Index(index));
                        element.dump_at(head, path, Some(item));
                        path.pop();
                    }
                }
                // A non-sequence is written through unchanged and left for
                // the validate pass to reject.
                Some(value) => head.write(path, value.clone()),
                None => {}
            },

            SchemaNode::Dict { fields } => match data {
                Some(Value::Object(map)) => {
                    head.write(path, Value::Object(serde_json::Map::new()));
                    // Schema-declared keys in declared order; input keys the
                    // schema does not declare are dropped here.
                    for (key, node) in fields {
                        path.push(Segment::key(key.clone()));
                        node.dump_at(head, path, map.get(key.as_str()));
                        path.pop();
                    }
                }
                Some(value) => head.write(path, value.clone()),
                None => {}
            },

            // Dump never judges option membership; validate does.
            SchemaNode::Options { .. } => {
                if let Some(value) = data {
                    head.write(path, value.clone());
                }
            }

            SchemaNode::Any => {
                if let Some(value) = data {
                    head.write(path, value.clone());
                }
            }
        }
    }
}
