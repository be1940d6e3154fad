//! Core computations: expand a tree into records, then filter per selection.
//!
//! - expand: tree + field names -> records (run once per tree, cached)
//! - filter: records + selection -> per-field options (run on every change)
//! - cascade: fill fields whose options collapse to one value
//! - form: caller-owned session driving all of the above

pub mod cache;
pub mod cascade;
pub mod expand;
pub mod filter;
pub mod form;
pub mod record;

pub use cache::RecordCache;
pub use cascade::{Cascade, CascadeState, auto_select};
pub use expand::expand;
pub use filter::{
    DefaultMatch, MatchFn, OptionMap, Overrides, Selection, default_match, filter_options,
    filter_options_with, ignore_case_match,
};
pub use form::Form;
pub use record::{Record, RecordSet};
