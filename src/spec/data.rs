//! Data file (JSON) holding the combination tree and, optionally, its field names.
//!
//! Either a catalog:
//! {
//!   "fields": ["country", "method", "currency"],
//!   "tree": { "SG": { "local": ["SGD"] } }
//! }
//! or a bare tree, in which case field names come from the command line.
//! A bare tree whose only keys are "fields" and "tree" reads as a catalog.

use crate::Result;
use crate::diagnostics;
use crate::error::Error;
use crate::spec::NestedTree;

use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::sync::Arc;

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DataFile {
    Catalog(CatalogSpec),
    Bare(NestedTree),
}

/// Raw catalog shape as it appears in the data file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogSpec {
    pub fields: Vec<String>,
    pub tree: NestedTree,
}

/// Field names plus a tree whose shape has been checked against them.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub fields: Vec<String>,
    pub tree: Arc<NestedTree>,
}

impl DataFile {
    /// Resolve field names (command line wins over the file) and check the tree shape.
    pub fn validate_and_build(self, fields_override: Option<Vec<String>>) -> Result<Catalog> {
        let (file_fields, tree) = match self {
            DataFile::Catalog(CatalogSpec { fields, tree }) => (Some(fields), tree),
            DataFile::Bare(tree) => (None, tree),
        };

        let fields = match (fields_override, file_fields) {
            (Some(cli), Some(file)) => {
                if cli != file {
                    diagnostics::warn(format!(
                        "--fields {:?} overrides fields {:?} from the data file",
                        cli, file
                    ));
                }
                cli
            }
            (Some(cli), None) => cli,
            (None, Some(file)) => file,
            (None, None) => return Err(Error::MissingFields.into()),
        };

        tree.check_shape(&fields)
            .with_context(|| diagnostics::error_message("data file does not match its field names"))?;

        Ok(Catalog {
            fields,
            tree: Arc::new(tree),
        })
    }
}

pub fn load_data_file(path: &str) -> Result<DataFile> {
    let text = fs::read_to_string(path)
        .with_context(|| diagnostics::error_message(format!("read data file {}", path)))?;
    parse_data_file(&text)
        .with_context(|| diagnostics::error_message(format!("parse data file {}", path)))
}

pub fn parse_data_file(text: &str) -> Result<DataFile> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn catalog_carries_its_fields() {
        let data = parse_data_file(
            r#"{ "fields": ["method", "currency"], "tree": { "local": ["SGD"] } }"#,
        )
        .unwrap();
        let catalog = data.validate_and_build(None).unwrap();
        assert_eq!(catalog.fields, names(&["method", "currency"]));
        assert_eq!(catalog.tree.leaf_count(), 1);
    }

    #[test]
    fn bare_tree_needs_fields_from_outside() {
        let data = parse_data_file(r#"{ "local": ["SGD", "AED"] }"#).unwrap();
        assert!(matches!(data, DataFile::Bare(_)));

        let err = data.clone().validate_and_build(None).unwrap_err();
        assert_eq!(err.downcast_ref::<Error>(), Some(&Error::MissingFields));

        let catalog = data
            .validate_and_build(Some(names(&["method", "currency"])))
            .unwrap();
        assert_eq!(catalog.tree.leaf_count(), 2);
    }

    #[test]
    fn override_replaces_file_fields() {
        let data = parse_data_file(
            r#"{ "fields": ["a", "b"], "tree": { "local": ["SGD"] } }"#,
        )
        .unwrap();
        let catalog = data
            .validate_and_build(Some(names(&["method", "currency"])))
            .unwrap();
        assert_eq!(catalog.fields, names(&["method", "currency"]));
    }

    #[test]
    fn shape_mismatch_surfaces_the_core_error() {
        let data = parse_data_file(r#"{ "local": ["SGD"] }"#).unwrap();
        let err = data.validate_and_build(Some(names(&["currency"]))).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::ShapeMismatch { .. })
        ));
    }
}
