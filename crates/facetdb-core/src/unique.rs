//! Distinct value extraction for faceted-filter population.

use crate::{dataset::Row, value::Value};

/// Collect the distinct value set of one column.
///
/// List cells are flattened element-wise; nulls and empty strings are
/// excluded. The result is canonically sorted and deduplicated, and is
/// always a plain sequence.
#[must_use]
pub fn unique_values(rows: &[Row], column: &str) -> Vec<Value> {
    let mut out = Vec::new();

    for row in rows {
        let Some(value) = row.get(column) else {
            continue;
        };

        match value {
            Value::List(items) => {
                out.extend(items.iter().filter(|item| is_facet_value(item)).cloned());
            }
            scalar if is_facet_value(scalar) => out.push(scalar.clone()),
            _ => {}
        }
    }

    out.sort_by(Value::cmp_canonical);
    out.dedup();

    out
}

fn is_facet_value(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Text(s) => !s.is_empty(),
        _ => true,
    }
}

///
/// TESTS
///
