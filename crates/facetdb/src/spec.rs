use facetdb_core::{
    query::{
        build_transform,
        expr::{parse, FilterBlock},
        FilterEntry, FilterMode, Pagination, SortRule, TransformState,
    },
    value::Value,
};
use serde::{Deserialize, Serialize};

///
/// SearchState
///
/// Filter entries and full-text words derived from the expression box.
/// Kept separate from facet-managed entries so re-typing the expression
/// replaces only its own contribution.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct SearchState {
    pub expression: String,
    pub filters: Vec<FilterEntry>,
    pub fulltext: Vec<String>,
}

///
/// GridSpec
///
/// The serializable grid state: facet filters, search-derived filters,
/// sort rules, pagination. Snapshots are immutable; every transition is
/// an explicit function returning a new spec, so no two surfaces ever
/// splice the same list.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct GridSpec {
    pub filters: Vec<FilterEntry>,
    #[serde(default)]
    pub search: SearchState,
    pub sort: Vec<SortRule>,
    #[serde(default)]
    pub pagination: Pagination,
}

impl GridSpec {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    ///
    /// TRANSITIONS
    ///

    /// Append one facet filter entry.
    #[must_use]
    pub fn with_filter(mut self, entry: FilterEntry) -> Self {
        self.filters.push(entry);
        self
    }

    /// Remove the facet entry at `index`; out-of-range indices are a no-op.
    #[must_use]
    pub fn without_filter(mut self, index: usize) -> Self {
        if index < self.filters.len() {
            self.filters.remove(index);
        }
        self
    }

    /// Enable or disable the facet entry at `index`.
    #[must_use]
    pub fn with_filter_enabled(mut self, index: usize, enabled: bool) -> Self {
        if let Some(entry) = self.filters.get_mut(index) {
            entry.enabled = enabled;
        }
        self
    }

    /// Set the ANY/ALL mode on every entry targeting `column`.
    #[must_use]
    pub fn with_filter_mode(mut self, column: &str, mode: FilterMode) -> Self {
        for entry in self.filters.iter_mut().filter(|e| e.column == column) {
            entry.mode = Some(mode);
        }
        self
    }

    /// Replace the sort rules.
    #[must_use]
    pub fn with_sort(mut self, sort: Vec<SortRule>) -> Self {
        self.sort = sort;
        self
    }

    /// Replace the pagination state.
    #[must_use]
    pub fn with_page(mut self, page: i64, page_size: i64) -> Self {
        self.pagination = Pagination::new(page, page_size);
        self
    }

    /// Re-derive the search contribution from a typed expression.
    ///
    /// Filter tokens become enabled entries (literals coerced by shape);
    /// bare words are retained for the full-text surface. The previous
    /// search contribution is replaced wholesale.
    #[must_use]
    pub fn with_search(mut self, expression: &str) -> Self {
        let mut filters = Vec::new();
        let mut fulltext = Vec::new();

        for block in parse(expression) {
            match block {
                FilterBlock::Filter {
                    column,
                    operator,
                    value,
                    ..
                } => filters.push(FilterEntry::new(
                    column,
                    operator,
                    Value::from_literal(&value),
                )),
                FilterBlock::FullText { value, .. } => fulltext.push(value),
            }
        }

        self.search = SearchState {
            expression: expression.to_string(),
            filters,
            fulltext,
        };
        self
    }

    ///
    /// QUERY
    ///

    /// Build the backend-agnostic transform for this snapshot.
    ///
    /// Facet entries come first, then search-derived entries, so grouping
    /// order is stable across re-parses of the same expression.
    #[must_use]
    pub fn transform(&self) -> TransformState {
        let entries: Vec<FilterEntry> = self
            .filters
            .iter()
            .chain(self.search.filters.iter())
            .cloned()
            .collect();

        build_transform(&entries, &self.sort, self.pagination)
    }
}

///
/// TESTS
///
