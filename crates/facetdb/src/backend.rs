use facetdb_core::{
    error::{Error, MutationError},
    provider::{LoadInput, MemoryProvider, RowMutation, TableProvider},
    query::TransformState,
    response::QueryResult,
    schema::Schema,
    value::Value,
};
use facetdb_sql::{SqlConfig, SqlEngine, SqlProvider};

///
/// Backend
///
/// Closed backend selection: one variant per storage substrate, one
/// provider interface over both. No string-keyed registry; adding a
/// backend means adding a variant.
///

pub enum Backend {
    Memory(MemoryProvider),
    Sql(SqlProvider<Box<dyn SqlEngine>>),
}

impl Backend {
    /// In-memory backend over raw records.
    #[must_use]
    pub fn memory() -> Self {
        Self::Memory(MemoryProvider::new())
    }

    /// SQL backend over an engine handle; the table arrives via `load`.
    #[must_use]
    pub fn sql(engine: Box<dyn SqlEngine>) -> Self {
        Self::Sql(SqlProvider::new(engine))
    }

    /// SQL backend from deployment configuration.
    pub fn sql_from_config(engine: Box<dyn SqlEngine>, config: &SqlConfig) -> Result<Self, Error> {
        Ok(Self::Sql(SqlProvider::from_config(engine, config)?))
    }

    const fn kind(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Sql(_) => "sql",
        }
    }
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Backend").field(&self.kind()).finish()
    }
}

impl TableProvider for Backend {
    fn load(&mut self, input: LoadInput) -> Result<Schema, Error> {
        match self {
            Self::Memory(provider) => provider.load(input),
            Self::Sql(provider) => provider.load(input),
        }
    }

    fn query(&mut self, transform: &TransformState) -> Result<QueryResult, Error> {
        match self {
            Self::Memory(provider) => provider.query(transform),
            Self::Sql(provider) => provider.query(transform),
        }
    }

    fn unique_values(&mut self, column: &str) -> Result<Vec<Value>, Error> {
        match self {
            Self::Memory(provider) => provider.unique_values(column),
            Self::Sql(provider) => provider.unique_values(column),
        }
    }

    fn schema(&self) -> Result<&Schema, Error> {
        match self {
            Self::Memory(provider) => provider.schema(),
            Self::Sql(provider) => provider.schema(),
        }
    }
}

// Row mutation is a memory-backend extension; the SQL backend reports it
// as unsupported rather than silently dropping writes.
impl RowMutation for Backend {
    fn update_cell(&mut self, row_id: u64, column: &str, value: Value) -> Result<(), Error> {
        match self {
            Self::Memory(provider) => provider.update_cell(row_id, column, value),
            Self::Sql(_) => Err(MutationError::Unsupported {
                backend: self.kind(),
            }
            .into()),
        }
    }

    fn delete_row(&mut self, row_id: u64) -> Result<(), Error> {
        match self {
            Self::Memory(provider) => provider.delete_row(row_id),
            Self::Sql(_) => Err(MutationError::Unsupported {
                backend: self.kind(),
            }
            .into()),
        }
    }

    fn duplicate_row(&mut self, row_id: u64) -> Result<u64, Error> {
        match self {
            Self::Memory(provider) => provider.duplicate_row(row_id),
            Self::Sql(_) => Err(MutationError::Unsupported {
                backend: self.kind(),
            }
            .into()),
        }
    }

    fn add_column(&mut self, name: &str, default: Value) -> Result<(), Error> {
        match self {
            Self::Memory(provider) => provider.add_column(name, default),
            Self::Sql(_) => Err(MutationError::Unsupported {
                backend: self.kind(),
            }
            .into()),
        }
    }
}
