//! Core engine for FacetDB: values, schema inference, the filter-expression
//! parser, the transform builder, and the in-memory executor behind the
//! provider contract.

// public exports are one module level down
pub mod dataset;
pub mod error;
pub mod executor;
pub mod provider;
pub mod query;
pub mod response;
pub mod schema;
pub mod unique;
pub mod value;

///
/// CONSTANTS
///

/// Column-name prefix reserved for engine-internal fields.
///
/// Columns carrying this prefix (row identity, bookkeeping) are excluded
/// from inferred schemas and never surfaced to filter/sort callers.
pub const RESERVED_COLUMN_PREFIX: &str = "__";

/// Internal column holding the stable per-row identifier.
pub const ROW_ID_COLUMN: &str = "__rowid";

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, executors, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        provider::{LoadInput, RowMutation, TableProvider},
        query::{
            CanonicalFilter, FilterMode, Operator, PageWindow, SortDirection, SortRule,
            TransformState,
        },
        response::QueryResult,
        schema::{ColumnType, Schema},
        value::Value,
    };
}
