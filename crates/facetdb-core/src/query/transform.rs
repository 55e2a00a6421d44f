use crate::{
    query::{CanonicalFilter, FilterMode, Operator, PageWindow, SortRule, TransformState},
    value::Value,
};
use serde::{Deserialize, Serialize};

///
/// FilterEntry
///
/// One user-added condition in the grid spec's filter list. Several entries may
/// target the same column; the builder collapses them under the group's
/// ANY/ALL mode.
///

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct FilterEntry {
    pub column: String,
    pub operator: Operator,
    pub value: Value,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<FilterMode>,
}

const fn default_enabled() -> bool {
    true
}

impl FilterEntry {
    /// Enabled equality entry; the most common UI-created shape.
    #[must_use]
    pub fn new(column: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            operator,
            value: value.into(),
            enabled: true,
            mode: None,
        }
    }
}

///
/// Pagination
///
/// Raw page/page-size state as the UI holds it. Out-of-range input is
/// clamped, never rejected; a missing page size disables pagination
/// entirely.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct Pagination {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl Pagination {
    #[must_use]
    pub const fn new(page: i64, page_size: i64) -> Self {
        Self {
            page: Some(page),
            page_size: Some(page_size),
        }
    }

    /// Resolve to an executor window: `offset = (page - 1) * page_size`
    /// with `page` clamped ≥ 1 and `page_size` clamped ≥ 0.
    #[must_use]
    pub fn window(self) -> Option<PageWindow> {
        let size = self.page_size?;

        let limit = u32::try_from(size.max(0)).unwrap_or(u32::MAX);
        let page = u32::try_from(self.page.unwrap_or(1).max(1)).unwrap_or(u32::MAX);
        let offset = (page - 1).saturating_mul(limit);

        Some(PageWindow { limit, offset })
    }
}

/// Collapse the grid spec's raw filter list plus sort/pagination state into one
/// backend-agnostic transform.
///
/// Deterministic by construction: grouping preserves first-seen column
/// order, so the same entry list always produces the same transform
/// regardless of which executor consumes it.
#[must_use]
pub fn build_transform(
    entries: &[FilterEntry],
    sort: &[SortRule],
    pagination: Pagination,
) -> TransformState {
    let mut groups: Vec<(&str, Vec<&FilterEntry>)> = Vec::new();

    for entry in entries.iter().filter(|entry| entry.enabled) {
        match groups.iter_mut().find(|(column, _)| *column == entry.column) {
            Some((_, group)) => group.push(entry),
            None => groups.push((entry.column.as_str(), vec![entry])),
        }
    }

    let filters = groups
        .into_iter()
        .map(|(column, group)| collapse_group(column, &group))
        .collect();

    TransformState {
        filters,
        sort: sort.to_vec(),
        pagination: pagination.window(),
    }
}

// A singleton group passes through unchanged; a larger group collapses to
// one membership filter under the group's shared mode (default ANY).
fn collapse_group(column: &str, group: &[&FilterEntry]) -> CanonicalFilter {
    if let [entry] = group {
        return CanonicalFilter {
            column: column.to_string(),
            operator: entry.operator.clone(),
            value: entry.value.clone(),
            mode: entry.mode,
        };
    }

    let mode = group.iter().find_map(|entry| entry.mode).unwrap_or_default();
    let operator = match mode {
        FilterMode::Any => Operator::In,
        FilterMode::All => Operator::InAll,
    };

    CanonicalFilter {
        column: column.to_string(),
        operator,
        value: Value::List(group.iter().map(|entry| entry.value.clone()).collect()),
        mode: Some(mode),
    }
}

///
/// TESTS
///
