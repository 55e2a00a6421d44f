//! Provider contract and the in-memory backend.
//!
//! Both executors sit behind one interface; the SQL backend lives in its
//! own crate and implements the same trait against an external engine.

use crate::{
    dataset::Dataset,
    error::{ConfigError, Error, MutationError},
    executor,
    query::{expr::UniqueValueSource, TransformState},
    response::QueryResult,
    schema::Schema,
    unique,
    value::Value,
};

///
/// LoadInput
///
/// Closed input variant for [`TableProvider::load`]: raw records for the
/// in-memory backend, a table attachment for the SQL backend. A provider
/// handed the wrong kind fails with a configuration error.
///

#[derive(Clone, Debug)]
pub enum LoadInput {
    Rows(Vec<serde_json::Value>),
    Table(String),
}

///
/// TableProvider
///
/// The contract both backends implement: load, query, unique values,
/// schema access. Querying before a successful load is a configuration
/// error, not a silent no-op.
///

pub trait TableProvider {
    fn load(&mut self, input: LoadInput) -> Result<Schema, Error>;

    fn query(&mut self, transform: &TransformState) -> Result<QueryResult, Error>;

    fn unique_values(&mut self, column: &str) -> Result<Vec<Value>, Error>;

    fn schema(&self) -> Result<&Schema, Error>;
}

impl<P: TableProvider> UniqueValueSource for P {
    fn unique_values(&mut self, column: &str) -> Result<Vec<Value>, Error> {
        TableProvider::unique_values(self, column)
    }
}

///
/// RowMutation
///
/// Optional mutation extension. Mutations apply in place; a query issued
/// immediately after observes the new state.
///

pub trait RowMutation {
    fn update_cell(&mut self, row_id: u64, column: &str, value: Value) -> Result<(), Error>;

    fn delete_row(&mut self, row_id: u64) -> Result<(), Error>;

    fn duplicate_row(&mut self, row_id: u64) -> Result<u64, Error>;

    fn add_column(&mut self, name: &str, default: Value) -> Result<(), Error>;
}

///
/// MemoryProvider
///
/// Native backend over the in-memory dataset.
///

#[derive(Clone, Debug, Default)]
pub struct MemoryProvider {
    dataset: Option<Dataset>,
}

impl MemoryProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the given identifier refers to a loaded row.
    #[must_use]
    pub fn has_row(&self, row_id: u64) -> bool {
        self.dataset.as_ref().is_some_and(|dataset| {
            dataset
                .rows()
                .iter()
                .any(|row| row.row_id() == Some(row_id))
        })
    }

    fn dataset(&self) -> Result<&Dataset, Error> {
        self.dataset
            .as_ref()
            .ok_or_else(|| ConfigError::SchemaNotLoaded.into())
    }

    fn dataset_mut(&mut self) -> Result<&mut Dataset, Error> {
        self.dataset
            .as_mut()
            .ok_or_else(|| ConfigError::SchemaNotLoaded.into())
    }
}

impl TableProvider for MemoryProvider {
    fn load(&mut self, input: LoadInput) -> Result<Schema, Error> {
        let LoadInput::Rows(records) = input else {
            return Err(ConfigError::UnsupportedLoadInput {
                expected: "raw records",
            }
            .into());
        };

        // reloading keeps the dataset's id counter: identifiers from a
        // previous generation are retired, not recycled
        let dataset = self.dataset.get_or_insert_with(Dataset::default);
        dataset.load(records);

        Ok(dataset.schema().clone())
    }

    fn query(&mut self, transform: &TransformState) -> Result<QueryResult, Error> {
        let dataset = self.dataset()?;

        Ok(executor::execute(
            dataset.rows(),
            dataset.schema(),
            transform,
        ))
    }

    fn unique_values(&mut self, column: &str) -> Result<Vec<Value>, Error> {
        let dataset = self.dataset()?;

        Ok(unique::unique_values(dataset.rows(), column))
    }

    fn schema(&self) -> Result<&Schema, Error> {
        Ok(self.dataset()?.schema())
    }
}

impl RowMutation for MemoryProvider {
    fn update_cell(&mut self, row_id: u64, column: &str, value: Value) -> Result<(), Error> {
        self.dataset_mut()?
            .update_cell(row_id, column, value)
            .map_err(Error::from)
    }

    fn delete_row(&mut self, row_id: u64) -> Result<(), Error> {
        self.dataset_mut()?.delete_row(row_id).map_err(Error::from)
    }

    fn duplicate_row(&mut self, row_id: u64) -> Result<u64, Error> {
        self.dataset_mut()?
            .duplicate_row(row_id)
            .map_err(Error::from)
    }

    fn add_column(&mut self, name: &str, default: Value) -> Result<(), Error> {
        self.dataset_mut()?.add_column(name, &default);

        Ok(())
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{build_transform, FilterEntry, Operator, Pagination};

    fn loaded() -> MemoryProvider {
        let mut provider = MemoryProvider::new();
        provider
            .load(LoadInput::Rows(vec![
                serde_json::json!({"name": "Ada", "team": "Engineering > Backend"}),
                serde_json::json!({"name": "Brin", "team": "Sales"}),
            ]))
            .unwrap();

        provider
    }

    #[test]
    fn querying_before_load_is_a_configuration_error() {
        let mut provider = MemoryProvider::new();
        let err = provider.query(&TransformState::default()).unwrap_err();

        assert!(matches!(
            err,
            Error::Config(ConfigError::SchemaNotLoaded)
        ));
    }

    #[test]
    fn table_input_is_rejected_by_the_memory_backend() {
        let mut provider = MemoryProvider::new();
        let err = provider
            .load(LoadInput::Table("employees".into()))
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Config(ConfigError::UnsupportedLoadInput { .. })
        ));
    }

    #[test]
    fn query_observes_mutations_immediately() {
        let mut provider = loaded();
        provider
            .update_cell(0, "name", Value::from("Lovelace"))
            .unwrap();

        let transform = build_transform(
            &[FilterEntry::new("name", Operator::Eq, "Lovelace")],
            &[],
            Pagination::default(),
        );
        let result = provider.query(&transform).unwrap();

        assert_eq!(result.total_count, 1);
    }

    #[test]
    fn mutation_errors_are_recoverable() {
        let mut provider = loaded();
        let err = provider.delete_row(42).unwrap_err();

        assert!(matches!(
            err,
            Error::Mutation(MutationError::RowNotFound { row_id: 42 })
        ));
        assert!(provider.has_row(0), "provider stays usable after the miss");
    }
}
