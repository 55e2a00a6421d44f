mod infer;

pub use infer::{detect_hierarchy, infer_schema};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::RESERVED_COLUMN_PREFIX;

///
/// ColumnType
///
/// Primitive classification of one column. `Hierarchy` marks a text column
/// whose values encode a `>`-delimited path; it takes precedence over the
/// primitive classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[serde(rename = "string")]
    Text,
    Number,
    Boolean,
    Date,
    Hierarchy,
}

///
/// HierarchySpec
///

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct HierarchySpec {
    pub delimiter: String,
}

///
/// ColumnSpec
///

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct ColumnSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: ColumnType,
}

///
/// Schema
///
/// Column names, primitive types, hierarchy delimiters, and display
/// aliases for one dataset. Rebuilt whole on every load or structural
/// mutation; never patched in place.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct Schema {
    pub columns: Vec<ColumnSpec>,
    pub types: BTreeMap<String, ColumnType>,
    pub hierarchy: BTreeMap<String, HierarchySpec>,
    pub aliases: BTreeMap<String, String>,
}

impl Schema {
    /// Empty schema for a dataset with no rows.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Look up the declared type of one column.
    #[must_use]
    pub fn column_type(&self, name: &str) -> Option<ColumnType> {
        self.types.get(name).copied()
    }

    /// True when the column is part of this schema.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Column names in schema order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }
}

/// True for engine-internal column names (row identity, bookkeeping).
#[must_use]
pub fn is_reserved_column(name: &str) -> bool {
    name.starts_with(RESERVED_COLUMN_PREFIX)
}
