//! Caller-owned session tying the pieces together.
//!
//! The form owns the selection explicitly; every mutation re-runs the filter
//! and, when enabled, the cascade hook before returning.

use crate::error::Error;
use crate::model::cache::RecordCache;
use crate::model::cascade::{CascadeState, auto_select};
use crate::model::filter::{OptionMap, Overrides, Selection, filter_options_with};
use crate::model::record::RecordSet;
use crate::spec::{Catalog, NestedTree, Scalar};
use std::sync::Arc;

#[derive(Debug)]
pub struct Form {
    fields: Vec<String>,
    tree: Arc<NestedTree>,
    cache: RecordCache,
    records: Arc<RecordSet>,
    selection: Selection,
    overrides: Overrides,
    cascade: CascadeState,
    auto_select: bool,
    options: OptionMap,
    last_filled: Vec<String>,
}

impl Form {
    /// Form with strict matching and auto-select enabled.
    pub fn new(catalog: Catalog) -> Result<Self, Error> {
        Self::with_settings(catalog, Overrides::new(), true)
    }

    pub fn with_settings(
        catalog: Catalog,
        overrides: Overrides,
        auto_select: bool,
    ) -> Result<Self, Error> {
        let Catalog { fields, tree } = catalog;
        let mut cache = RecordCache::new();
        let records = cache.get_or_expand(&tree, &fields)?;

        tracing::info!(
            fields = fields.len(),
            records = records.len(),
            "loaded combinations"
        );

        let mut form = Self {
            selection: Selection::empty(fields.iter().cloned()),
            fields,
            tree,
            cache,
            records,
            overrides,
            cascade: CascadeState::new(),
            auto_select,
            options: OptionMap::default(),
            last_filled: Vec::new(),
        };
        form.refresh();
        Ok(form)
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn tree(&self) -> &Arc<NestedTree> {
        &self.tree
    }

    pub fn records(&self) -> &Arc<RecordSet> {
        &self.records
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn options(&self) -> &OptionMap {
        &self.options
    }

    /// Fields filled automatically by the most recent update.
    pub fn last_filled(&self) -> &[String] {
        &self.last_filled
    }

    /// Map user input onto a known value of `field` (so "10" finds the number 10),
    /// falling back to plain text.
    pub fn resolve(&self, field: &str, raw: &str) -> Scalar {
        self.records
            .iter()
            .filter_map(|r| r.get(field))
            .find(|v| v.to_string() == raw)
            .cloned()
            .unwrap_or_else(|| Scalar::text(raw))
    }

    /// Set `field` from raw input; blank input clears it.
    pub fn select(&mut self, field: &str, raw: &str) -> Result<Vec<String>, Error> {
        let value = self.resolve(field, raw.trim());
        self.select_value(field, value)
    }

    pub fn select_value(&mut self, field: &str, value: Scalar) -> Result<Vec<String>, Error> {
        self.ensure_field(field)?;
        if !value.is_blank() && !self.options.values(field).contains(&&value) {
            tracing::warn!(
                field,
                value = %value,
                "selected value is not among the current options"
            );
        }
        self.selection.set(field, Some(value));
        Ok(self.refresh())
    }

    pub fn clear(&mut self, field: &str) -> Result<Vec<String>, Error> {
        self.ensure_field(field)?;
        self.selection.clear(field);
        Ok(self.refresh())
    }

    /// Clear every field and forget the cascade history.
    pub fn reset(&mut self) -> Vec<String> {
        self.selection = Selection::empty(self.fields.iter().cloned());
        self.cascade.reset();
        self.refresh()
    }

    /// Swap in a new tree; records are rebuilt, the selection is kept.
    pub fn replace_tree(&mut self, tree: Arc<NestedTree>) -> Result<Vec<String>, Error> {
        self.records = self.cache.get_or_expand(&tree, &self.fields)?;
        self.tree = tree;
        Ok(self.refresh())
    }

    fn ensure_field(&self, field: &str) -> Result<(), Error> {
        if self.selection.contains_field(field) {
            Ok(())
        } else {
            Err(Error::UnknownField(field.to_string()))
        }
    }

    fn refresh(&mut self) -> Vec<String> {
        if self.auto_select {
            let cascade = auto_select(
                &self.records,
                &mut self.selection,
                &mut self.cascade,
                &self.overrides,
            );
            self.options = cascade.options;
            self.last_filled = cascade.filled;
        } else {
            self.options = filter_options_with(&self.records, &self.selection, &self.overrides);
            self.last_filled.clear();
        }
        self.last_filled.clone()
    }
}
