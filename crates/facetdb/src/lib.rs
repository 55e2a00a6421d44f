//! FacetDB: facet-filter, sort, and paginate tabular data through a
//! serializable grid spec, against interchangeable backends.
//!
//! The facade owns the grid spec (UI state snapshots) and backend
//! selection;
//! the engine semantics live in `facetdb-core`, SQL translation in
//! `facetdb-sql`.

mod backend;
mod spec;

pub use backend::Backend;
pub use spec::{GridSpec, SearchState};

// re-exports: the engine vocabulary callers interact with
pub use facetdb_core::{
    dataset::{Dataset, Row},
    error::{ConfigError, EngineError, Error, MutationError},
    executor::{QueryTraceEvent, QueryTraceSink, TracePhase},
    provider::{LoadInput, MemoryProvider, RowMutation, TableProvider},
    query::{
        build_transform,
        expr::{parse, serialize, suggest, FilterBlock},
        CanonicalFilter, FilterEntry, FilterMode, Operator, PageWindow, Pagination,
        SortDirection, SortRule, TransformState,
    },
    response::{QueryResult, Rows},
    schema::{ColumnType, Schema},
    value::Value,
};
pub use facetdb_sql::{SqlConfig, SqlEngine, SqlProvider};
