use crate::spec::Scalar;
use indexmap::IndexMap;
use serde::Serialize;

/// One complete combination: a value for every field, in root-to-leaf order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Record {
    values: IndexMap<String, Scalar>,
}

/// Every record derived from one tree, in expansion order.
pub type RecordSet = Vec<Record>;

impl Record {
    pub(crate) fn from_values(values: IndexMap<String, Scalar>) -> Self {
        Self { values }
    }

    pub fn get(&self, field: &str) -> Option<&Scalar> {
        self.values.get(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<Scalar>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
