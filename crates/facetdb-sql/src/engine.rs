//! Engine port: the single I/O boundary to the external SQL engine.
//!
//! The provider owns statement text and result interpretation; the engine
//! only ships SQL out and rows back. Each call is atomic from the
//! caller's perspective; the port defines no ordering across calls.

use facetdb_core::{
    dataset::Row,
    error::EngineError,
    schema::{ColumnSpec, ColumnType, Schema},
    value::Value,
};
use std::collections::{BTreeMap, BTreeSet};

///
/// SqlEngine
///

pub trait SqlEngine {
    /// Execute one statement and return its rows.
    fn execute(&mut self, sql: &str) -> Result<Vec<Row>, EngineError>;
}

impl SqlEngine for Box<dyn SqlEngine> {
    fn execute(&mut self, sql: &str) -> Result<Vec<Row>, EngineError> {
        self.as_mut().execute(sql)
    }
}

/// Interpret a `DESCRIBE`-style reply into a schema plus the set of
/// list-typed columns.
///
/// Expects one row per column with `column_name` and `column_type` cells
/// (the analytical-engine convention). Unrecognized engine types classify
/// as text.
#[must_use]
pub fn schema_from_describe(rows: &[Row]) -> (Schema, BTreeSet<String>) {
    let mut columns = Vec::new();
    let mut types = BTreeMap::new();
    let mut list_columns = BTreeSet::new();

    for row in rows {
        let Some(name) = row.get("column_name").and_then(Value::as_text) else {
            continue;
        };
        let engine_type = row
            .get("column_type")
            .and_then(Value::as_text)
            .unwrap_or_default();

        let element_type = engine_type.strip_suffix("[]").inspect(|_| {
            list_columns.insert(name.to_string());
        });
        let ty = column_type_from_engine(element_type.unwrap_or(engine_type));

        columns.push(ColumnSpec {
            name: name.to_string(),
            ty,
        });
        types.insert(name.to_string(), ty);
    }

    let schema = Schema {
        columns,
        types,
        hierarchy: BTreeMap::new(),
        aliases: BTreeMap::new(),
    };

    (schema, list_columns)
}

fn column_type_from_engine(engine_type: &str) -> ColumnType {
    let upper = engine_type.to_uppercase();

    if upper.contains("INT")
        || upper.contains("DOUBLE")
        || upper.contains("FLOAT")
        || upper.contains("DECIMAL")
        || upper.contains("REAL")
    {
        ColumnType::Number
    } else if upper.contains("BOOL") {
        ColumnType::Boolean
    } else if upper.contains("DATE") || upper.contains("TIMESTAMP") {
        ColumnType::Date
    } else {
        ColumnType::Text
    }
}

///
/// TESTS
///
