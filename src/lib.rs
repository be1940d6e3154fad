//! Dependent, mutually-filtering selections.
//!
//! A nested tree of allowed combinations is flattened once into records
//! ([`model::expand`]); every change to a partial selection then derives, per
//! field, the values that are still reachable ([`model::filter_options`]).

pub mod command;
pub mod diagnostics;
pub mod error;
pub mod model;
pub mod render;
pub mod spec;

pub use error::Error;

pub type Result<T> = anyhow::Result<T>;
