//! A single selectable value.
//!
//! Leaves in the data file are strings or numbers: ["SGD", "AED"] or [10, 20].
//! Equality is strict, so the text "10" and the number 10 are different values.

use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Number(Number),
}

impl Scalar {
    pub fn text(s: impl Into<String>) -> Self {
        Scalar::Text(s.into())
    }

    /// Empty text counts as "no value" when it shows up in a selection.
    pub fn is_blank(&self) -> bool {
        matches!(self, Scalar::Text(s) if s.is_empty())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            Scalar::Number(_) => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => f.write_str(s),
            Scalar::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Number(n.into())
    }
}

impl From<u64> for Scalar {
    fn from(n: u64) -> Self {
        Scalar::Number(n.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn text_and_number_never_compare_equal() {
        assert_ne!(Scalar::from("10"), Scalar::from(10i64));
        assert_eq!(Scalar::from(10i64).to_string(), "10");
    }

    #[test]
    fn deserializes_strings_and_numbers() {
        let values: Vec<Scalar> = serde_json::from_str(r#"["SGD", 7, 2.5]"#).unwrap();
        assert_eq!(values[0], Scalar::text("SGD"));
        assert_eq!(values[1], Scalar::from(7u64));
        assert_eq!(values[2].to_string(), "2.5");
    }

    #[test]
    fn only_empty_text_is_blank() {
        assert!(Scalar::text("").is_blank());
        assert!(!Scalar::text(" ").is_blank());
        assert!(!Scalar::from(0i64).is_blank());
    }
}
