use crate::{
    engine::{schema_from_describe, SqlEngine},
    ident::{quote_ident, validate_table_ident},
    render::{count_statement, render_parts, select_statement},
};
use facetdb_core::{
    error::{ConfigError, EngineError, Error},
    provider::{LoadInput, TableProvider},
    query::TransformState,
    response::{QueryResult, Rows},
    schema::{detect_hierarchy, ColumnType, Schema},
    unique,
    value::Value,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// Rows sampled after attach for hierarchy detection.
const HIERARCHY_SAMPLE_ROWS: u32 = 100;

///
/// SqlConfig
///
/// Deployment configuration for the SQL backend. The table name is
/// required; construction fails fast when it is absent or invalid.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct SqlConfig {
    pub table: Option<String>,
}

impl SqlConfig {
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: Some(table.into()),
        }
    }
}

///
/// SqlProvider
///
/// SQL-backed provider: translates transforms to statements and runs them
/// through the engine port. The schema must be loaded (via the DESCRIBE
/// round-trip in [`TableProvider::load`]) before any query or
/// unique-values call.
///

pub struct SqlProvider<E: SqlEngine> {
    engine: E,
    table: Option<String>,
    schema: Option<Schema>,
    list_columns: BTreeSet<String>,
}

// Manual impl: engines are opaque I/O handles and carry no useful state.
impl<E: SqlEngine> std::fmt::Debug for SqlProvider<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlProvider")
            .field("table", &self.table)
            .field("schema_loaded", &self.schema.is_some())
            .field("list_columns", &self.list_columns)
            .finish_non_exhaustive()
    }
}

impl<E: SqlEngine> SqlProvider<E> {
    /// Provider with no table attached yet; `load` supplies one.
    #[must_use]
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            table: None,
            schema: None,
            list_columns: BTreeSet::new(),
        }
    }

    /// Provider from deployment configuration; the configured table is
    /// validated immediately and attached on the first `load`.
    pub fn from_config(engine: E, config: &SqlConfig) -> Result<Self, Error> {
        let table = config.table.clone().ok_or(ConfigError::MissingTable)?;
        validate_table_ident(&table)?;

        Ok(Self {
            engine,
            table: Some(table),
            schema: None,
            list_columns: BTreeSet::new(),
        })
    }

    /// Re-attach the configured table, refreshing schema and samples.
    pub fn reload(&mut self) -> Result<Schema, Error> {
        let table = self.table.clone().ok_or(ConfigError::MissingTable)?;

        self.attach(table)
    }

    /// Attach a table: validate its name, describe it, and sample rows
    /// for hierarchy detection.
    fn attach(&mut self, table: String) -> Result<Schema, Error> {
        validate_table_ident(&table)?;

        let describe_rows = self
            .engine
            .execute(&format!("DESCRIBE {}", quote_ident(&table)))?;
        let (mut schema, list_columns) = schema_from_describe(&describe_rows);

        let sample = self.engine.execute(&format!(
            "SELECT * FROM {} LIMIT {HIERARCHY_SAMPLE_ROWS}",
            quote_ident(&table)
        ))?;
        let hierarchy = detect_hierarchy(&sample);
        for name in hierarchy.keys() {
            if let Some(ty) = schema.types.get_mut(name) {
                *ty = ColumnType::Hierarchy;
            }
            if let Some(column) = schema.columns.iter_mut().find(|c| &c.name == name) {
                column.ty = ColumnType::Hierarchy;
            }
        }
        schema.hierarchy = hierarchy;

        self.table = Some(table);
        self.schema = Some(schema.clone());
        self.list_columns = list_columns;

        Ok(schema)
    }

    fn loaded(&self) -> Result<(&str, &Schema), Error> {
        let table = self.table.as_deref().ok_or(ConfigError::MissingTable)?;
        let schema = self
            .schema
            .as_ref()
            .ok_or(ConfigError::SchemaNotLoaded)?;

        Ok((table, schema))
    }
}

impl<E: SqlEngine> TableProvider for SqlProvider<E> {
    fn load(&mut self, input: LoadInput) -> Result<Schema, Error> {
        let LoadInput::Table(table) = input else {
            return Err(ConfigError::UnsupportedLoadInput {
                expected: "a table name",
            }
            .into());
        };

        self.attach(table)
    }

    fn query(&mut self, transform: &TransformState) -> Result<QueryResult, Error> {
        let (table, schema) = self.loaded()?;
        let (table, schema) = (table.to_string(), schema.clone());

        let parts = render_parts(transform, &schema, &self.list_columns)?;
        let data = self.engine.execute(&select_statement(&table, &parts))?;

        let count_rows = self.engine.execute(&count_statement(&table, &parts))?;
        let total_count = count_rows
            .first()
            .and_then(|row| row.get("count"))
            .and_then(Value::as_u64)
            .ok_or_else(|| EngineError::new("count query returned no usable row"))?;

        Ok(QueryResult {
            data: Rows(data),
            total_count,
            schema,
        })
    }

    fn unique_values(&mut self, column: &str) -> Result<Vec<Value>, Error> {
        let (table, schema) = self.loaded()?;
        if !schema.contains(column) {
            return Err(ConfigError::UnknownColumn {
                column: column.to_string(),
            }
            .into());
        }
        let table = table.to_string();

        let rows = self.engine.execute(&format!(
            "SELECT DISTINCT {} FROM {}",
            quote_ident(column),
            quote_ident(&table)
        ))?;

        // engine-side DISTINCT leaves list cells intact; flattening,
        // null/empty exclusion, and canonical ordering happen here
        Ok(unique::unique_values(&rows, column))
    }

    fn schema(&self) -> Result<&Schema, Error> {
        self.schema
            .as_ref()
            .ok_or_else(|| ConfigError::SchemaNotLoaded.into())
    }
}

///
/// TESTS
///
