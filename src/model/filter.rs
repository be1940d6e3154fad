//! Derive, for every field of a partial selection, the values still reachable.
//!
//! A record counts towards field `t` when every *other* filled field matches it.
//! A field never filters itself, so the value a user already picked stays listed.
//! Unfilled fields impose no constraint.

use crate::model::record::Record;
use crate::spec::Scalar;
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use std::fmt;

/// Caller-owned partial assignment: field -> chosen value, `None` when unfilled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Selection {
    values: IndexMap<String, Option<Scalar>>,
}

impl Selection {
    /// All `fields` present and unfilled.
    pub fn empty<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: fields.into_iter().map(|f| (f.into(), None)).collect(),
        }
    }

    pub fn with(mut self, field: &str, value: impl Into<Scalar>) -> Self {
        self.set(field, Some(value.into()));
        self
    }

    /// Fill or clear `field`, adding it if missing. Empty text clears.
    pub fn set(&mut self, field: &str, value: Option<Scalar>) {
        let value = value.filter(|v| !v.is_blank());
        match self.values.get_mut(field) {
            Some(slot) => *slot = value,
            None => {
                self.values.insert(field.to_string(), value);
            }
        }
    }

    pub fn clear(&mut self, field: &str) {
        if let Some(slot) = self.values.get_mut(field) {
            *slot = None;
        }
    }

    /// The filled value of `field`, if any.
    pub fn get(&self, field: &str) -> Option<&Scalar> {
        self.values.get(field).and_then(Option::as_ref)
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Scalar>)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    pub fn filled_count(&self) -> usize {
        self.values.values().filter(|v| v.is_some()).count()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Per-field reachable values, in first-occurrence order across records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OptionMap {
    options: IndexMap<String, IndexSet<Scalar>>,
}

impl OptionMap {
    pub fn get(&self, field: &str) -> Option<&IndexSet<Scalar>> {
        self.options.get(field)
    }

    /// Reachable values for `field`; empty for unknown fields.
    pub fn values(&self, field: &str) -> Vec<&Scalar> {
        self.options
            .get(field)
            .map(|set| set.iter().collect())
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &IndexSet<Scalar>)> {
        self.options.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Strict equality; handed to override predicates so they can delegate.
pub type DefaultMatch = fn(&Scalar, &Scalar) -> bool;

/// Override predicate: `(record value, selected value, default) -> matches`.
pub type MatchFn = dyn Fn(&Scalar, &Scalar, DefaultMatch) -> bool + Send + Sync;

pub fn default_match(record: &Scalar, chosen: &Scalar) -> bool {
    record == chosen
}

/// Text compared case-insensitively; anything else goes to `default`.
pub fn ignore_case_match(record: &Scalar, chosen: &Scalar, default: DefaultMatch) -> bool {
    match (record.as_str(), chosen.as_str()) {
        (Some(a), Some(b)) => a.to_lowercase() == b.to_lowercase(),
        _ => default(record, chosen),
    }
}

/// Per-field replacements for the default equality check.
///
/// An override fully replaces the default for its field; it receives the
/// default as its third argument.
#[derive(Default)]
pub struct Overrides {
    by_field: IndexMap<String, Box<MatchFn>>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<F>(mut self, field: &str, matcher: F) -> Self
    where
        F: Fn(&Scalar, &Scalar, DefaultMatch) -> bool + Send + Sync + 'static,
    {
        self.insert(field, matcher);
        self
    }

    pub fn insert<F>(&mut self, field: &str, matcher: F)
    where
        F: Fn(&Scalar, &Scalar, DefaultMatch) -> bool + Send + Sync + 'static,
    {
        self.by_field.insert(field.to_string(), Box::new(matcher));
    }

    pub fn get(&self, field: &str) -> Option<&MatchFn> {
        self.by_field.get(field).map(|f| f.as_ref())
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.by_field.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.by_field.is_empty()
    }

    fn matches(&self, field: &str, record: &Scalar, chosen: &Scalar) -> bool {
        match self.get(field) {
            Some(matcher) => matcher(record, chosen, default_match),
            None => default_match(record, chosen),
        }
    }
}

impl fmt::Debug for Overrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.by_field.keys()).finish()
    }
}

pub fn filter_options(records: &[Record], selection: &Selection) -> OptionMap {
    filter_options_with(records, selection, &Overrides::default())
}

/// Compute the option set of every field in `selection`.
///
/// Each record is checked once against all filled fields. With no mismatch it
/// feeds every field; with exactly one mismatch at `f` it still feeds `f`
/// (the only field allowed to ignore that comparison); otherwise it feeds none.
pub fn filter_options_with(
    records: &[Record],
    selection: &Selection,
    overrides: &Overrides,
) -> OptionMap {
    let mut options: IndexMap<String, IndexSet<Scalar>> = selection
        .fields()
        .map(|field| (field.to_string(), IndexSet::new()))
        .collect();

    for record in records {
        match fit(record, selection, overrides) {
            Fit::Everywhere => {
                for (field, values) in options.iter_mut() {
                    if let Some(value) = record.get(field) {
                        values.insert(value.clone());
                    }
                }
            }
            Fit::Only(field, value) => {
                if let Some(values) = options.get_mut(field) {
                    values.insert(value.clone());
                }
            }
            Fit::Nowhere => {}
        }
    }

    OptionMap { options }
}

enum Fit<'a> {
    Everywhere,
    Only(&'a str, &'a Scalar),
    Nowhere,
}

fn fit<'a>(record: &'a Record, selection: &Selection, overrides: &Overrides) -> Fit<'a> {
    let mut mismatch = None;
    for (field, value) in record.iter() {
        let Some(chosen) = selection.get(field) else {
            continue;
        };
        if overrides.matches(field, value, chosen) {
            continue;
        }
        if mismatch.is_some() {
            return Fit::Nowhere;
        }
        mismatch = Some((field, value));
    }

    match mismatch {
        None => Fit::Everywhere,
        Some((field, value)) => Fit::Only(field, value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::expand;
    use crate::spec::NestedTree;
    use pretty_assertions::assert_eq;

    const FIELDS: [&str; 3] = ["country", "method", "currency"];

    fn records() -> Vec<Record> {
        let tree: NestedTree = serde_json::from_str(
            r#"{
                "SG": { "local": ["SGD", "AED"], "swift": ["USD", "CAD"] },
                "IN": { "local": ["INR", "NPR"] }
            }"#,
        )
        .unwrap();
        let fields: Vec<String> = FIELDS.iter().map(|s| s.to_string()).collect();
        expand(&tree, &fields).unwrap()
    }

    fn shown(options: &OptionMap, field: &str) -> Vec<String> {
        options.values(field).iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn unfilled_selection_lists_everything() {
        let options = filter_options(&records(), &Selection::empty(FIELDS));
        assert_eq!(shown(&options, "country"), vec!["SG", "IN"]);
        assert_eq!(shown(&options, "method"), vec!["local", "swift"]);
        assert_eq!(
            shown(&options, "currency"),
            vec!["SGD", "AED", "USD", "CAD", "INR", "NPR"]
        );
    }

    #[test]
    fn filled_field_keeps_its_own_alternatives() {
        let selection = Selection::empty(FIELDS).with("country", "SG");
        let options = filter_options(&records(), &selection);
        assert_eq!(shown(&options, "country"), vec!["SG", "IN"]);
        assert_eq!(shown(&options, "method"), vec!["local", "swift"]);
        assert_eq!(shown(&options, "currency"), vec!["SGD", "AED", "USD", "CAD"]);
    }

    #[test]
    fn two_filled_fields_narrow_the_third() {
        let selection = Selection::empty(FIELDS)
            .with("country", "SG")
            .with("method", "swift");
        let options = filter_options(&records(), &selection);
        assert_eq!(shown(&options, "currency"), vec!["USD", "CAD"]);
        assert_eq!(shown(&options, "country"), vec!["SG"]);
        assert_eq!(shown(&options, "method"), vec!["local", "swift"]);
    }

    #[test]
    fn impossible_combination_empties_the_rest() {
        let selection = Selection::empty(FIELDS)
            .with("country", "IN")
            .with("method", "swift");
        let options = filter_options(&records(), &selection);
        assert!(shown(&options, "currency").is_empty());
        assert_eq!(shown(&options, "country"), vec!["SG"]);
        assert_eq!(shown(&options, "method"), vec!["local"]);
    }

    #[test]
    fn empty_records_and_unknown_fields_give_empty_sets() {
        let selection = Selection::empty(["country", "fee"]).with("country", "SG");
        let options = filter_options(&[], &selection);
        assert!(shown(&options, "country").is_empty());

        let options = filter_options(&records(), &selection);
        assert!(shown(&options, "fee").is_empty());
        assert_eq!(shown(&options, "country"), vec!["SG", "IN"]);
    }

    #[test]
    fn blank_text_counts_as_unfilled() {
        let selection = Selection::empty(FIELDS).with("country", "");
        assert_eq!(selection.get("country"), None);
        let options = filter_options(&records(), &selection);
        assert_eq!(shown(&options, "currency").len(), 6);
    }

    #[test]
    fn override_replaces_equality_for_its_field() {
        let selection = Selection::empty(FIELDS).with("country", "sg");
        let strict = filter_options(&records(), &selection);
        assert!(shown(&strict, "method").is_empty());

        let overrides = Overrides::new().with("country", ignore_case_match);
        let relaxed = filter_options_with(&records(), &selection, &overrides);
        assert_eq!(shown(&relaxed, "method"), vec!["local", "swift"]);
    }

    #[test]
    fn override_can_delegate_to_default() {
        let overrides = Overrides::new().with("method", |record, chosen, default| {
            chosen.as_str() == Some("any") || default(record, chosen)
        });

        let any = Selection::empty(FIELDS).with("method", "any");
        let options = filter_options_with(&records(), &any, &overrides);
        assert_eq!(shown(&options, "currency").len(), 6);

        let swift = Selection::empty(FIELDS).with("method", "swift");
        let options = filter_options_with(&records(), &swift, &overrides);
        assert_eq!(shown(&options, "currency"), vec!["USD", "CAD"]);
    }

    #[test]
    fn ignore_case_leaves_numbers_to_default() {
        assert!(ignore_case_match(&Scalar::text("Sg"), &Scalar::text("sG"), default_match));
        assert!(!ignore_case_match(&Scalar::from(1i64), &Scalar::text("1"), default_match));
        assert!(ignore_case_match(&Scalar::from(1i64), &Scalar::from(1i64), default_match));
    }

    #[test]
    fn option_map_serializes_as_plain_lists() {
        let selection = Selection::empty(["method"]).with("method", "swift");
        let options = filter_options(&records()[2..4], &selection);
        assert_eq!(
            serde_json::to_string(&options).unwrap(),
            r#"{"method":["swift"]}"#
        );
    }
}
