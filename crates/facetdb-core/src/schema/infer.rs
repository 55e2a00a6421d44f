//! Schema inference over a sample of rows.
//!
//! Primitive classification reads the first sample row, matching the
//! source of truth for a freshly loaded dataset; hierarchy detection scans
//! the whole sample because a path-valued cell can appear on any row.

use crate::{
    dataset::Row,
    schema::{is_reserved_column, ColumnSpec, ColumnType, HierarchySpec, Schema},
    value::Value,
};
use std::collections::{BTreeMap, BTreeSet};
use time::{
    format_description::well_known::{Iso8601, Rfc3339},
    Date, OffsetDateTime,
};

/// Delimiter that marks a text column as hierarchical.
pub(crate) const HIERARCHY_DELIMITER: &str = ">";

/// Derive a full schema from sample rows.
///
/// Reserved (`__`-prefixed) columns are excluded. An empty sample yields
/// an empty schema.
#[must_use]
pub fn infer_schema(sample: &[Row]) -> Schema {
    let names = column_names(sample);
    if names.is_empty() {
        return Schema::empty();
    }

    let hierarchy = detect_hierarchy(sample);
    let mut columns = Vec::with_capacity(names.len());
    let mut types = BTreeMap::new();

    for name in names {
        let ty = if hierarchy.contains_key(&name) {
            ColumnType::Hierarchy
        } else {
            primitive_type(sample.first().and_then(|row| row.get(&name)))
        };

        columns.push(ColumnSpec {
            name: name.clone(),
            ty,
        });
        types.insert(name, ty);
    }

    Schema {
        columns,
        types,
        hierarchy,
        aliases: BTreeMap::new(),
    }
}

/// Scan a sample for path-valued text columns.
///
/// A column qualifies as soon as any of its text cells (or text elements
/// of a list cell) contains the `>` delimiter, overriding the primitive
/// classification.
#[must_use]
pub fn detect_hierarchy(sample: &[Row]) -> BTreeMap<String, HierarchySpec> {
    let mut hierarchy = BTreeMap::new();

    for row in sample {
        for (name, value) in row.entries() {
            if is_reserved_column(name) || hierarchy.contains_key(name) {
                continue;
            }
            if contains_delimited_text(value) {
                hierarchy.insert(
                    name.to_string(),
                    HierarchySpec {
                        delimiter: HIERARCHY_DELIMITER.to_string(),
                    },
                );
            }
        }
    }

    hierarchy
}

fn column_names(sample: &[Row]) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    for row in sample {
        for (name, _) in row.entries() {
            if !is_reserved_column(name) {
                names.insert(name.to_string());
            }
        }
    }

    names
}

fn primitive_type(value: Option<&Value>) -> ColumnType {
    match value {
        Some(Value::Int(_) | Value::Float(_)) => ColumnType::Number,
        Some(Value::Bool(_)) => ColumnType::Boolean,
        Some(Value::Text(s)) if is_date_string(s) => ColumnType::Date,
        // Null, List, Text, and absent cells all default to string
        _ => ColumnType::Text,
    }
}

fn contains_delimited_text(value: &Value) -> bool {
    match value {
        Value::Text(s) => s.contains(HIERARCHY_DELIMITER),
        Value::List(items) => items.iter().any(contains_delimited_text),
        _ => false,
    }
}

fn is_date_string(s: &str) -> bool {
    Date::parse(s, &Iso8601::DEFAULT).is_ok() || OffsetDateTime::parse(s, &Rfc3339).is_ok()
}

///
/// TESTS
///
