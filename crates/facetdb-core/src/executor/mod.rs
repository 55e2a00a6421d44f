//! Native executor: filter, stable-sort, paginate over in-memory rows.

mod order;
mod trace;

pub use trace::{QueryTraceEvent, QueryTraceSink, TracePhase};

use crate::{
    dataset::Row,
    query::{filter_matches, TransformState},
    response::{QueryResult, Rows},
    schema::Schema,
};

/// Execute a transform against an ordered row sequence.
///
/// Purely functional over its inputs: filtering is a conjunction across
/// canonical filters, sorting is stable and null-tolerant, and the page
/// slice is clamped to bounds with `total_count` measured before slicing.
#[must_use]
pub fn execute(rows: &[Row], schema: &Schema, transform: &TransformState) -> QueryResult {
    execute_traced(rows, schema, transform, None)
}

/// [`execute`] with an optional trace sink observing per-phase row counts.
#[must_use]
pub fn execute_traced(
    rows: &[Row],
    schema: &Schema,
    transform: &TransformState,
    sink: Option<&dyn QueryTraceSink>,
) -> QueryResult {
    let mut selected: Vec<&Row> = rows
        .iter()
        .filter(|row| {
            transform
                .filters
                .iter()
                .all(|filter| filter_matches(row, filter))
        })
        .collect();
    trace::emit(sink, TracePhase::Filter, selected.len());

    order::apply_sort(&mut selected, &transform.sort);
    trace::emit(sink, TracePhase::Order, selected.len());

    let total_count = selected.len() as u64;
    let data = paginate(&selected, transform);
    trace::emit(sink, TracePhase::Page, data.len());

    QueryResult {
        data: Rows(data),
        total_count,
        schema: schema.clone(),
    }
}

// Slice [offset, offset + limit), clamped to bounds; an offset beyond the
// end yields an empty page and leaves total_count untouched.
fn paginate(selected: &[&Row], transform: &TransformState) -> Vec<Row> {
    let Some(window) = transform.pagination else {
        return selected.iter().map(|row| (*row).clone()).collect();
    };

    let start = (window.offset as usize).min(selected.len());
    let end = start.saturating_add(window.limit as usize).min(selected.len());

    selected[start..end].iter().map(|row| (*row).clone()).collect()
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dataset::Dataset,
        query::{build_transform, FilterEntry, Operator, Pagination, SortRule},
        value::Value,
    };
    use std::cell::RefCell;

    fn employees() -> Dataset {
        let mut dataset = Dataset::default();
        dataset.load(vec![
            serde_json::json!({"id": 1, "name": "Ada",   "salary": 120_000, "active": true}),
            serde_json::json!({"id": 2, "name": "Brin",  "salary": 95_000,  "active": true}),
            serde_json::json!({"id": 3, "name": "Cray",  "salary": 150_000, "active": false}),
            serde_json::json!({"id": 4, "name": "Dijk",  "salary": 110_000, "active": true}),
            serde_json::json!({"id": 5, "name": "Eich",  "salary": 80_000,  "active": false}),
        ]);

        dataset
    }

    fn ids(result: &QueryResult) -> Vec<i64> {
        result
            .data
            .iter()
            .map(|row| match row.get("id") {
                Some(Value::Int(i)) => *i,
                other => panic!("unexpected id cell: {other:?}"),
            })
            .collect()
    }

    #[test]
    fn conjunction_filters_then_sorts_descending() {
        let dataset = employees();
        let transform = build_transform(
            &[
                FilterEntry::new("active", Operator::Eq, true),
                FilterEntry::new("salary", Operator::Gte, 100_000),
            ],
            &[SortRule::desc("salary")],
            Pagination::default(),
        );

        let result = execute(dataset.rows(), dataset.schema(), &transform);
        assert_eq!(result.total_count, 2);
        assert_eq!(ids(&result), vec![1, 4], "highest salary first");
    }

    #[test]
    fn sorting_is_stable_under_equal_keys() {
        let mut dataset = Dataset::default();
        dataset.load(vec![
            serde_json::json!({"id": 1, "priority": 5}),
            serde_json::json!({"id": 2, "priority": 5}),
            serde_json::json!({"id": 3, "priority": 5}),
        ]);
        let transform = build_transform(&[], &[SortRule::asc("priority")], Pagination::default());

        let result = execute(dataset.rows(), dataset.schema(), &transform);
        assert_eq!(ids(&result), vec![1, 2, 3], "equal keys keep load order");
    }

    #[test]
    fn nulls_sort_before_values_ascending() {
        let mut dataset = Dataset::default();
        dataset.load(vec![
            serde_json::json!({"id": 1, "rank": 2}),
            serde_json::json!({"id": 2, "rank": null}),
            serde_json::json!({"id": 3, "rank": 1}),
        ]);
        let transform = build_transform(&[], &[SortRule::asc("rank")], Pagination::default());

        let result = execute(dataset.rows(), dataset.schema(), &transform);
        assert_eq!(ids(&result), vec![2, 3, 1]);
    }

    #[test]
    fn page_beyond_bounds_is_empty_with_unchanged_total() {
        let dataset = employees();
        let transform = build_transform(
            &[FilterEntry::new("active", Operator::Eq, true)],
            &[],
            Pagination::new(999, 50),
        );

        let result = execute(dataset.rows(), dataset.schema(), &transform);
        assert!(result.data.is_empty());
        assert_eq!(result.total_count, 3);
    }

    #[test]
    fn pagination_slices_after_counting() {
        let dataset = employees();
        let transform = build_transform(
            &[],
            &[SortRule::asc("salary")],
            Pagination::new(2, 2),
        );

        let result = execute(dataset.rows(), dataset.schema(), &transform);
        assert_eq!(result.total_count, 5);
        assert_eq!(ids(&result), vec![4, 1]);
    }

    #[test]
    fn unknown_operator_returns_a_defined_result() {
        let dataset = employees();
        let transform = build_transform(
            &[FilterEntry::new(
                "salary",
                Operator::Unknown("INVALID_OP".into()),
                1,
            )],
            &[],
            Pagination::default(),
        );

        let result = execute(dataset.rows(), dataset.schema(), &transform);
        assert_eq!(result.total_count, 5, "unknown operators have no effect");
    }

    #[test]
    fn trace_sink_observes_phase_row_counts() {
        struct Recorder(RefCell<Vec<QueryTraceEvent>>);

        impl QueryTraceSink for Recorder {
            fn on_event(&self, event: QueryTraceEvent) {
                self.0.borrow_mut().push(event);
            }
        }

        let dataset = employees();
        let transform = build_transform(
            &[FilterEntry::new("active", Operator::Eq, true)],
            &[],
            Pagination::new(1, 2),
        );

        let recorder = Recorder(RefCell::new(Vec::new()));
        let _ = execute_traced(dataset.rows(), dataset.schema(), &transform, Some(&recorder));

        let events = recorder.0.into_inner();
        assert_eq!(
            events,
            vec![
                QueryTraceEvent {
                    phase: TracePhase::Filter,
                    rows: 3
                },
                QueryTraceEvent {
                    phase: TracePhase::Order,
                    rows: 3
                },
                QueryTraceEvent {
                    phase: TracePhase::Page,
                    rows: 2
                },
            ]
        );
    }
}
