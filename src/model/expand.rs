//! Flatten a nested tree into one record per root-to-leaf path.
//!
//! { "local": ["SGD", "AED"], "swift": ["USD"] } with ["method", "currency"]
//! yields, in order:
//!   { method: local, currency: SGD }
//!   { method: local, currency: AED }
//!   { method: swift, currency: USD }
//!
//! Time and output size are O(n^d); recursion depth is d. Values repeated under
//! different parents produce distinct records.

use crate::error::Error;
use crate::model::record::{Record, RecordSet};
use crate::spec::{NestedTree, Scalar};
use indexmap::IndexMap;

/// Expand `tree` using `fields` as the per-level names (root first).
///
/// The shape is checked before anything is materialized, so a mismatch fails
/// fast with the offending path instead of producing truncated records.
pub fn expand(tree: &NestedTree, fields: &[String]) -> Result<RecordSet, Error> {
    tree.check_shape(fields)?;

    let records: RecordSet = expand_level(tree, fields)
        .into_iter()
        .map(Record::from_values)
        .collect();

    tracing::debug!(
        records = records.len(),
        depth = fields.len(),
        "expanded combination tree"
    );
    Ok(records)
}

/// Shape already checked: `fields` is non-empty and matches this subtree's depth.
fn expand_level(tree: &NestedTree, fields: &[String]) -> Vec<IndexMap<String, Scalar>> {
    let (head, rest) = match fields.split_first() {
        Some(split) => split,
        None => return Vec::new(),
    };

    match tree {
        NestedTree::Leaf(values) => values
            .iter()
            .map(|value| {
                let mut row = IndexMap::with_capacity(1);
                row.insert(head.clone(), value.clone());
                row
            })
            .collect(),
        NestedTree::Branch(children) => children
            .iter()
            .flat_map(|(key, child)| {
                expand_level(child, rest).into_iter().map(move |below| {
                    let mut row = IndexMap::with_capacity(below.len() + 1);
                    row.insert(head.clone(), key.as_str().into());
                    row.extend(below);
                    row
                })
            })
            .collect(),
    }
}
