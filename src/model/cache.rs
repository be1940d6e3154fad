//! Memoized expansion keyed by (tree identity, field names).
//!
//! The published record set is immutable and shared through `Arc`, so filter
//! calls can hold on to it while a new tree is expanded. A rebuild replaces the
//! entry only after expansion has finished.

use crate::error::Error;
use crate::model::expand::expand;
use crate::model::record::RecordSet;
use crate::spec::NestedTree;
use std::sync::Arc;

#[derive(Debug)]
struct Entry {
    tree: Arc<NestedTree>,
    fields: Vec<String>,
    records: Arc<RecordSet>,
}

#[derive(Debug, Default)]
pub struct RecordCache {
    entry: Option<Entry>,
}

impl RecordCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached records for this exact tree allocation and field list,
    /// expanding (and replacing the entry) otherwise.
    pub fn get_or_expand(
        &mut self,
        tree: &Arc<NestedTree>,
        fields: &[String],
    ) -> Result<Arc<RecordSet>, Error> {
        if let Some(entry) = &self.entry {
            if Arc::ptr_eq(&entry.tree, tree) && entry.fields == fields {
                tracing::debug!(records = entry.records.len(), "record cache hit");
                return Ok(Arc::clone(&entry.records));
            }
        }

        tracing::debug!("record cache miss; expanding tree");
        let records = Arc::new(expand(tree, fields)?);
        self.entry = Some(Entry {
            tree: Arc::clone(tree),
            fields: fields.to_vec(),
            records: Arc::clone(&records),
        });
        Ok(records)
    }

    pub fn cached(&self) -> Option<Arc<RecordSet>> {
        self.entry.as_ref().map(|e| Arc::clone(&e.records))
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}
