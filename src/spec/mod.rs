//! Input layer: scalar values, the nested combination tree and the data-file schema.
//!
//! This module is separate from the core computations in `model`.
//! It owns:
//! - Scalar (one selectable value)
//! - NestedTree (allowed combinations, validated against field names)
//! - DataFile / Catalog (JSON input + validated result)

pub mod data;
pub mod scalar;
pub mod tree;

pub use data::{Catalog, DataFile, load_data_file};
pub use scalar::Scalar;
pub use tree::NestedTree;
