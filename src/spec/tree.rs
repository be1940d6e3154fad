//! Nested tree of allowed combinations.
//!
//! JSON shape (depth 3, fields ["country", "method", "currency"]):
//! {
//!   "SG": { "local": ["SGD", "AED"], "swift": ["USD", "CAD"] },
//!   "IN": { "local": ["INR", "NPR"] }
//! }
//!
//! Objects become `Branch` (key order preserved), arrays become `Leaf`.
//! Every root-to-leaf path must cross exactly one level per field name.

use crate::error::Error;
use crate::spec::Scalar;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NestedTree {
    Leaf(Vec<Scalar>),
    Branch(IndexMap<String, NestedTree>),
}

impl NestedTree {
    /// Number of root-to-leaf value paths, i.e. the number of records `expand` yields.
    pub fn leaf_count(&self) -> usize {
        match self {
            NestedTree::Leaf(values) => values.len(),
            NestedTree::Branch(children) => children.values().map(NestedTree::leaf_count).sum(),
        }
    }

    /// Validate field names and check that every path has one level per field.
    pub fn check_shape(&self, fields: &[String]) -> Result<(), Error> {
        check_fields(fields)?;
        if fields.is_empty() {
            return Err(Error::ShapeMismatch {
                path: render_path(&[]),
                expected: "at least one field name".to_string(),
                found: "none".to_string(),
            });
        }

        let mut path = Vec::new();
        self.check_level(fields, 0, &mut path)
    }

    fn check_level<'a>(
        &'a self,
        fields: &[String],
        depth: usize,
        path: &mut Vec<&'a str>,
    ) -> Result<(), Error> {
        let is_last = depth + 1 == fields.len();
        match self {
            // No paths below an empty container, so any depth fits.
            NestedTree::Leaf(values) if values.is_empty() => Ok(()),
            NestedTree::Branch(children) if children.is_empty() => Ok(()),
            NestedTree::Leaf(_) if is_last => Ok(()),
            NestedTree::Leaf(_) => Err(Error::ShapeMismatch {
                path: render_path(path),
                expected: format!("a mapping of '{}' values", fields[depth]),
                found: "a list".to_string(),
            }),
            NestedTree::Branch(_) if is_last => Err(Error::ShapeMismatch {
                path: render_path(path),
                expected: format!("a list of '{}' values", fields[depth]),
                found: "a mapping".to_string(),
            }),
            NestedTree::Branch(children) => {
                for (key, child) in children {
                    path.push(key);
                    child.check_level(fields, depth + 1, path)?;
                    path.pop();
                }
                Ok(())
            }
        }
    }
}

fn check_fields(fields: &[String]) -> Result<(), Error> {
    let mut seen = HashSet::new();
    for (index, field) in fields.iter().enumerate() {
        if field.trim().is_empty() {
            return Err(Error::EmptyFieldName { index });
        }
        if !seen.insert(field.as_str()) {
            return Err(Error::DuplicateField(field.clone()));
        }
    }
    Ok(())
}

/// Render ["SG", "local"] as `$["SG"]["local"]`.
fn render_path(path: &[&str]) -> String {
    let mut out = String::from("$");
    for key in path {
        out.push_str(&format!("[{:?}]", key));
    }
    out
}
