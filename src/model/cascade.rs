//! Auto-select a field once its candidate list collapses to a single value.
//!
//! Call [`auto_select`] right after every selection change. A field is
//! re-examined only when its candidate signature (length, first candidate)
//! differs from the last one seen, so a field the user just cleared stays
//! empty until its candidates actually change.

use crate::model::filter::{OptionMap, Overrides, Selection, filter_options_with};
use crate::model::record::Record;
use crate::spec::Scalar;
use indexmap::IndexMap;

type Signature = (usize, Option<Scalar>);

/// Last candidate signature seen per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadeState {
    seen: IndexMap<String, Signature>,
}

impl CascadeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every signature; the next run treats all lists as new.
    pub fn reset(&mut self) {
        self.seen.clear();
    }
}

/// Outcome of one cascade run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cascade {
    /// Options for the final selection.
    pub options: OptionMap,
    /// Fields filled automatically, in the order they were filled.
    pub filled: Vec<String>,
}

/// Run filtering to a fixed point, filling single-candidate fields one at a time.
///
/// Each round assigns at most one field; the number of rounds is bounded by the
/// number of fields.
pub fn auto_select(
    records: &[Record],
    selection: &mut Selection,
    state: &mut CascadeState,
    overrides: &Overrides,
) -> Cascade {
    let mut filled = Vec::new();
    let rounds = selection.len();

    for _ in 0..=rounds {
        let options = filter_options_with(records, selection, overrides);
        match next_assignment(&options, selection, state) {
            Some((field, value)) => {
                tracing::debug!(field = %field, value = %value, "auto-selected sole candidate");
                selection.set(&field, Some(value));
                filled.push(field);
            }
            None => return Cascade { options, filled },
        }
    }

    tracing::warn!(
        rounds,
        "cascade did not settle; leaving remaining fields as they are"
    );
    Cascade {
        options: filter_options_with(records, selection, overrides),
        filled,
    }
}

/// Update signatures in field order and stop at the first field to fill.
fn next_assignment(
    options: &OptionMap,
    selection: &Selection,
    state: &mut CascadeState,
) -> Option<(String, Scalar)> {
    for (field, candidates) in options.iter() {
        let signature: Signature = (candidates.len(), candidates.first().cloned());
        if state.seen.get(field) == Some(&signature) {
            continue;
        }
        state.seen.insert(field.to_string(), signature);

        if candidates.len() != 1 {
            continue;
        }
        let sole = &candidates[0];
        if selection.get(field) != Some(sole) {
            return Some((field.to_string(), sole.clone()));
        }
    }
    None
}
