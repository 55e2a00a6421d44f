//! In-memory dataset: ordered rows, stable row identity, row-level
//! mutation operations.

use crate::{
    error::MutationError,
    schema::{infer_schema, Schema},
    value::Value,
    ROW_ID_COLUMN,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// Row
///
/// One record: a column-to-value map with deterministic column order.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Row {
    values: BTreeMap<String, Value>,
}

impl Row {
    /// Build a row from column/value pairs.
    #[must_use]
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, Value)>) -> Self {
        Self {
            values: pairs.into_iter().collect(),
        }
    }

    /// Borrow one cell.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    /// Replace one cell, creating the column on this row if absent.
    pub fn set(&mut self, column: impl Into<String>, value: Value) {
        self.values.insert(column.into(), value);
    }

    /// Iterate cells in column order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The stable row identifier, if this row has been loaded.
    #[must_use]
    pub fn row_id(&self) -> Option<u64> {
        self.values.get(ROW_ID_COLUMN).and_then(Value::as_u64)
    }
}

///
/// Dataset
///
/// Owner of the loaded rows and their inferred schema.
///
/// Row identifiers come from a monotone counter assigned at load time and
/// are never reused, so row references stay stable across deletion. The
/// schema is rebuilt whole on load and on structural mutation, never
/// patched.
///

#[derive(Clone, Debug, Default)]
pub struct Dataset {
    rows: Vec<Row>,
    schema: Schema,
    next_row_id: u64,
}

impl Dataset {
    /// Ingest raw JSON records, replacing any previously loaded rows.
    ///
    /// Non-object entries carry no cells and are skipped; cell values map
    /// through the standard JSON bridge.
    pub fn load(&mut self, records: Vec<serde_json::Value>) -> &Schema {
        self.rows = Vec::with_capacity(records.len());

        for record in records {
            let serde_json::Value::Object(fields) = record else {
                continue;
            };

            let mut row = Row::from_pairs(
                fields
                    .into_iter()
                    .map(|(column, value)| (column, Value::from(value))),
            );
            row.set(ROW_ID_COLUMN, Value::from(self.allocate_row_id()));
            self.rows.push(row);
        }

        self.rebuild_schema();
        &self.schema
    }

    /// Borrow the loaded rows in load order.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Borrow the current schema.
    #[must_use]
    pub const fn schema(&self) -> &Schema {
        &self.schema
    }

    ///
    /// MUTATION
    ///
    /// Row-level operations mutate in place; a query issued immediately
    /// after observes the new state (no snapshot isolation).
    ///

    /// Overwrite one cell on an existing row.
    pub fn update_cell(
        &mut self,
        row_id: u64,
        column: &str,
        value: Value,
    ) -> Result<(), MutationError> {
        let row = self.row_mut(row_id)?;
        row.set(column, value);

        Ok(())
    }

    /// Remove one row. Its identifier is retired, never reassigned.
    pub fn delete_row(&mut self, row_id: u64) -> Result<(), MutationError> {
        let position = self.row_position(row_id)?;
        self.rows.remove(position);

        Ok(())
    }

    /// Clone one row under a fresh identifier, inserted after the source.
    pub fn duplicate_row(&mut self, row_id: u64) -> Result<u64, MutationError> {
        let position = self.row_position(row_id)?;

        let mut copy = self.rows[position].clone();
        let new_id = self.allocate_row_id();
        copy.set(ROW_ID_COLUMN, Value::from(new_id));
        self.rows.insert(position + 1, copy);

        Ok(new_id)
    }

    /// Add a column with a default value to every row and rebuild the
    /// schema (structural mutation).
    pub fn add_column(&mut self, name: &str, default: &Value) {
        for row in &mut self.rows {
            if row.get(name).is_none() {
                row.set(name, default.clone());
            }
        }

        self.rebuild_schema();
    }

    fn allocate_row_id(&mut self) -> u64 {
        let id = self.next_row_id;
        self.next_row_id += 1;

        id
    }

    fn rebuild_schema(&mut self) {
        self.schema = infer_schema(&self.rows);
    }

    fn row_position(&self, row_id: u64) -> Result<usize, MutationError> {
        self.rows
            .iter()
            .position(|row| row.row_id() == Some(row_id))
            .ok_or(MutationError::RowNotFound { row_id })
    }

    fn row_mut(&mut self, row_id: u64) -> Result<&mut Row, MutationError> {
        let position = self.row_position(row_id)?;

        Ok(&mut self.rows[position])
    }
}

///
/// TESTS
///
