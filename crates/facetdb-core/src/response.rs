use crate::{dataset::Row, schema::Schema};
use derive_more::{Deref, IntoIterator};
use serde::{Deserialize, Serialize};

///
/// Rows
///
/// Ordered result rows. A plain sequence by contract: callers rely on
/// standard slice/iterator operations.
///

#[derive(
    Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq, Deserialize, Serialize,
)]
#[serde(transparent)]
pub struct Rows(pub Vec<Row>);

impl Rows {
    #[must_use]
    pub fn into_inner(self) -> Vec<Row> {
        self.0
    }
}

///
/// QueryResult
///
/// Materialized query response. `total_count` reflects post-filter,
/// pre-pagination cardinality; `data` is the paginated slice.
///

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct QueryResult {
    pub data: Rows,
    pub total_count: u64,
    pub schema: Schema,
}

impl QueryResult {
    /// Empty result under a given schema.
    #[must_use]
    pub fn empty(schema: Schema) -> Self {
        Self {
            data: Rows::default(),
            total_count: 0,
            schema,
        }
    }
}
